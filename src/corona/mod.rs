//! 코로나 처리 공정 계산 모듈 모음.
//!
//! 모든 함수는 입력값만으로 결과가 정해지는 순수 함수이며, 화면 갱신 때마다
//! 다시 호출해도 안전하다.

pub mod dyne_decay;
pub mod speed_sweep;
pub mod watt_density;

pub use dyne_decay::*;
pub use speed_sweep::*;
pub use watt_density::*;

/// 소수점 둘째 자리로 반올림한다. 차트에 내보내는 값은 모두 이 규칙을 따른다.
///
/// 이진 값의 정확한 십진 전개를 기준으로 가까운 쪽을 고르고, 정확히 가운데인
/// 값만 0에서 먼 쪽으로 올린다 (30.224999...는 30.22).
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // 셋째 자리가 정확히 5인 이진 값은 1/8 단위뿐이고, 이때 `value * 100`은 오차가 없다.
    if (value * 8.0).fract() == 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
