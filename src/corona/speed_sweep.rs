use thiserror::Error;

use super::round2;
use super::watt_density::{watt_density_at_speed, LineConfig};

/// 스윕 시작 속도 [ft/min]
pub const SWEEP_START_FPM: f64 = 10.0;
/// 최대 라인 속도 대비 스윕 상한 배율.
pub const SWEEP_HEADROOM: f64 = 1.25;
/// 스윕 상한을 나누는 구간 수. 간격은 `ceil(상한 / 20)`.
pub const SWEEP_DIVISIONS: f64 = 20.0;
/// 간격 하한. 간격이 0 이하로 계산되면 이 값으로 올린다.
pub const MIN_SWEEP_STEP: f64 = 1.0;

/// 속도 스윕 차트의 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSweepPoint {
    /// 스윕 속도 [ft/min]
    pub speed_fpm: f64,
    /// Line 1 와트 밀도 (소수 둘째 자리)
    pub line1: f64,
    /// Line 4 와트 밀도 (소수 둘째 자리)
    pub line4: f64,
}

/// 스윕 범위 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    /// `ceil(max(속도) * 1.25)`
    pub extended_max: f64,
    /// 샘플 간격. 하한 1.
    pub step: f64,
    /// 간격이 하한으로 올려졌는지 여부
    pub step_clamped: bool,
}

/// 속도 스윕 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SweepError {
    /// 라인 속도가 NaN/무한대여서 스윕 범위를 정할 수 없음
    #[error("sweep range is not finite (max line speed {0})")]
    NonFiniteRange(f64),
}

/// 두 라인의 속도로 스윕 상한과 간격을 정한다.
pub fn sweep_range(line1: &LineConfig, line4: &LineConfig) -> Result<SweepRange, SweepError> {
    let (a, b) = (line1.speed_fpm, line4.speed_fpm);
    // f64::max는 NaN을 무시하므로 직접 걸러낸다.
    let max_speed = if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    };
    let extended_max = (max_speed * SWEEP_HEADROOM).ceil();
    if !extended_max.is_finite() {
        return Err(SweepError::NonFiniteRange(max_speed));
    }
    let raw_step = (extended_max / SWEEP_DIVISIONS).ceil();
    let step_clamped = raw_step < MIN_SWEEP_STEP;
    Ok(SweepRange {
        extended_max,
        step: if step_clamped { MIN_SWEEP_STEP } else { raw_step },
        step_clamped,
    })
}

/// 10 fpm부터 확장 상한까지 두 라인의 와트 밀도 곡선을 샘플링한다.
///
/// 각 라인의 폭/출력/처리면수는 고정하고 속도만 스윕 값으로 바꾼다. 상한이 10보다
/// 작으면 빈 목록을 돌려준다.
pub fn speed_sweep(
    line1: &LineConfig,
    line4: &LineConfig,
) -> Result<Vec<SpeedSweepPoint>, SweepError> {
    let range = sweep_range(line1, line4)?;
    if range.step_clamped {
        tracing::warn!(
            extended_max = range.extended_max,
            "sweep step computed below {MIN_SWEEP_STEP}; clamped"
        );
    }
    let mut points = Vec::new();
    let mut speed = SWEEP_START_FPM;
    while speed <= range.extended_max {
        points.push(SpeedSweepPoint {
            speed_fpm: speed,
            line1: round2(watt_density_at_speed(line1, speed)),
            line4: round2(watt_density_at_speed(line4, speed)),
        });
        speed += range.step;
    }
    Ok(points)
}
