use super::round2;

/// 감쇠 곡선의 마지막 일자. 0일부터 포함하므로 점은 31개.
pub const DECAY_DAYS: u32 = 30;

/// 다인 감쇠 차트의 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayPoint {
    pub day: u32,
    /// 해당 일자의 다인 레벨 [dyn/cm] (소수 둘째 자리)
    pub dyne: f64,
}

/// 처리 직후 다인 레벨에서 하루 단위 복리 감쇠 곡선을 만든다.
///
/// `dyne(0) = desired_dyne`, `dyne(d) = dyne(d-1) * (1 - decay_rate)`.
/// 내보내는 값만 반올림하고, 다음 날 계산에는 반올림 전 값을 이어서 쓴다.
/// 감쇠율이 1 이상이거나 음수여도 그대로 계산한다.
pub fn dyne_decay(desired_dyne: f64, decay_rate: f64) -> Vec<DecayPoint> {
    let retention = 1.0 - decay_rate;
    let mut dyne = desired_dyne;
    let mut points = Vec::with_capacity(DECAY_DAYS as usize + 1);
    for day in 0..=DECAY_DAYS {
        points.push(DecayPoint {
            day,
            dyne: round2(dyne),
        });
        dyne *= retention;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_unrounded_value() {
        // 반올림 값을 이어 쓰면 10일차가 30.96이 된다.
        let points = dyne_decay(42.0, 0.03);
        assert_eq!(points.len(), 31);
        assert_eq!(points[10].day, 10);
        assert_eq!(points[10].dyne, 30.97);
    }

    #[test]
    fn negative_rate_grows() {
        let points = dyne_decay(40.0, -0.1);
        assert_eq!(points[1].dyne, 44.0);
    }

    #[test]
    fn rate_above_one_flips_sign() {
        let points = dyne_decay(40.0, 2.0);
        assert_eq!(points[1].dyne, -40.0);
        assert_eq!(points[2].dyne, 40.0);
    }
}
