//! 와트 밀도와 속도 스윕 회귀 테스트.
use corona_treatment_toolbox::corona::{
    speed_sweep, sweep_range, watt_density, LineConfig, SWEEP_START_FPM,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn line(width_in: f64, speed_fpm: f64, power_kw: f64, sides: f64) -> LineConfig {
    LineConfig {
        width_in,
        speed_fpm,
        power_kw,
        sides,
    }
}

#[test]
fn closed_form_matches_12000_power_over_area() {
    for (w, s, p, n) in [
        (48.0, 100.0, 1.0, 1.0),
        (60.0, 350.0, 12.5, 2.0),
        (24.0, 40.0, 3.0, 1.0),
        (80.0, 1200.0, 40.0, 2.0),
    ] {
        let expected = 12000.0 * p / (w * s * n);
        assert_close("wd", watt_density(&line(w, s, p, n)), expected, 1e-9);
    }
}

#[test]
fn default_lines_sweep() {
    let l = LineConfig::default();
    let range = sweep_range(&l, &l).expect("range");
    assert_eq!(range.extended_max, 125.0);
    assert_eq!(range.step, 7.0);

    let points = speed_sweep(&l, &l).expect("sweep");
    assert_eq!(points.len(), 17);
    assert_eq!(points[0].speed_fpm, SWEEP_START_FPM);
    assert_eq!(points[0].line1, 25.0);
    assert_eq!(points[0].line4, 25.0);
    let last = points.last().expect("last point");
    assert_eq!(last.speed_fpm, 122.0);
    assert!(last.speed_fpm + range.step > range.extended_max);
    // 122 fpm: 250/122 = 2.0491... → 2.05
    assert_eq!(last.line1, 2.05);
}

#[test]
fn each_line_keeps_its_own_width_power_sides() {
    let l1 = line(48.0, 100.0, 1.0, 1.0);
    let l4 = line(24.0, 80.0, 2.0, 2.0);
    let points = speed_sweep(&l1, &l4).expect("sweep");
    for p in &points {
        let wd1 = 12000.0 / (48.0 * p.speed_fpm);
        let wd4 = 12000.0 * 2.0 / (24.0 * p.speed_fpm * 2.0);
        assert_close("line1", p.line1, wd1, 0.005 + 1e-9);
        assert_close("line4", p.line4, wd4, 0.005 + 1e-9);
    }
}

#[test]
fn sweep_length_formula() {
    for speed in [8.0, 40.0, 100.0, 333.0, 1000.0, 2750.0] {
        let l = line(48.0, speed, 1.0, 1.0);
        let range = sweep_range(&l, &l).expect("range");
        let expected = ((range.extended_max - SWEEP_START_FPM) / range.step).floor() as usize + 1;
        assert_eq!(speed_sweep(&l, &l).expect("sweep").len(), expected, "speed={speed}");
    }
}

#[test]
fn sweep_is_idempotent() {
    let l1 = line(52.0, 240.0, 6.0, 2.0);
    let l4 = line(36.0, 180.0, 4.5, 1.0);
    assert_eq!(speed_sweep(&l1, &l4), speed_sweep(&l1, &l4));
}

#[test]
fn zero_sides_sweep_is_infinite_not_error() {
    let l1 = line(48.0, 100.0, 1.0, 0.0);
    let points = speed_sweep(&l1, &LineConfig::default()).expect("sweep");
    assert!(points.iter().all(|p| p.line1 == f64::INFINITY));
}
