/// 인치 → 피트 환산 계수.
pub const INCHES_PER_FOOT: f64 = 12.0;
/// kW → W 환산 계수.
pub const WATTS_PER_KILOWATT: f64 = 1000.0;

/// 생산 라인 한 개의 코로나 처리 설정.
///
/// 입력 화면의 숫자 필드가 그대로 들어오므로 검증하지 않는다. 0이나 NaN도
/// 그대로 저장되고 계산 결과에 무한대/NaN으로 드러난다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineConfig {
    /// 웹 폭 [in]
    pub width_in: f64,
    /// 라인 속도 [ft/min]
    pub speed_fpm: f64,
    /// 처리기 출력 [kW]
    pub power_kw: f64,
    /// 처리 면 수 (정상 입력은 1 또는 2)
    pub sides: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            width_in: 48.0,
            speed_fpm: 100.0,
            power_kw: 1.0,
            sides: 1.0,
        }
    }
}

/// 와트 밀도 [W/ft²/min]를 계산한다.
///
/// `(kW * 1000) / (폭[ft] * 속도[fpm] * 처리면수)`. 분모가 0이면 IEEE-754 규칙대로
/// 무한대(0/0이면 NaN)가 나온다.
pub fn watt_density(line: &LineConfig) -> f64 {
    watt_density_at_speed(line, line.speed_fpm)
}

/// 라인 속도만 `speed_fpm`으로 바꾼 와트 밀도. 폭/출력/처리면수는 라인 설정값을 쓴다.
pub fn watt_density_at_speed(line: &LineConfig, speed_fpm: f64) -> f64 {
    let width_ft = line.width_in / INCHES_PER_FOOT;
    (line.power_kw * WATTS_PER_KILOWATT) / (width_ft * speed_fpm * line.sides)
}
