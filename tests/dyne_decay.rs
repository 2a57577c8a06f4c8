//! 다인 감쇠 곡선 회귀 테스트.
use corona_treatment_toolbox::corona::{dyne_decay, DECAY_DAYS};

#[test]
fn tpo_reference_values() {
    let points = dyne_decay(42.0, 0.03);
    assert_eq!(points.len(), DECAY_DAYS as usize + 1);
    assert_eq!(points[0].dyne, 42.0);
    assert_eq!(points[1].dyne, 40.74);
    assert_eq!(points[2].dyne, 39.52);
    // 42 * 0.97^30 = 16.8423 (반올림 전 값을 이어서 계산)
    assert_eq!(points[30].day, 30);
    assert_eq!(points[30].dyne, 16.84);
}

#[test]
fn near_half_values_round_down() {
    assert_eq!(dyne_decay(31.0, 0.025)[1].dyne, 30.22);
    assert_eq!(dyne_decay(30.0, 0.05)[2].dyne, 27.07);
}

#[test]
fn days_are_sequential() {
    let points = dyne_decay(44.0, 0.025);
    for (i, p) in points.iter().enumerate() {
        assert_eq!(p.day as usize, i);
    }
}

#[test]
fn zero_rate_is_flat() {
    assert!(dyne_decay(42.0, 0.0).iter().all(|p| p.dyne == 42.0));
}

#[test]
fn full_rate_drops_to_zero_after_day_zero() {
    let points = dyne_decay(42.0, 1.0);
    assert_eq!(points[0].dyne, 42.0);
    assert!(points[1..].iter().all(|p| p.dyne == 0.0));
}

#[test]
fn nan_rate_propagates_without_panic() {
    let points = dyne_decay(42.0, f64::NAN);
    assert_eq!(points[0].dyne, 42.0);
    assert!(points[1..].iter().all(|p| p.dyne.is_nan()));
}

#[test]
fn decay_is_idempotent() {
    assert_eq!(dyne_decay(46.0, 0.015), dyne_decay(46.0, 0.015));
}
