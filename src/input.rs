//! 입력 필드 문자열을 숫자로 바꾸는 규칙.
//!
//! 화면의 숫자 입력은 검증 없이 그대로 상태에 들어간다. 해석할 수 없는 문자열은
//! 오류 대신 NaN이 되어 계산식을 따라 전파된다.

/// 라인 설정/목표 다인 입력용 해석. 앞뒤 공백을 무시하고, 빈 문자열은 0,
/// 전체가 숫자가 아니면 NaN.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(v) = parse_infinity(s) {
        return v;
    }
    // Rust 파서는 "inf"/"nan"도 받아들이므로 숫자 표기 문자만 허용한다.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// 재질 필드 편집용 해석. 앞쪽의 가장 긴 숫자 부분만 읽는다 ("0.05x" → 0.05).
/// 숫자로 시작하지 않으면 (빈 문자열 포함) NaN.
pub fn parse_leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    if let Some(v) = leading_infinity(s) {
        return v;
    }
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}

/// 고정 소수 자릿수로 표시한다. NaN/무한대는 "NaN", "Infinity", "-Infinity".
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// 입력 칸에 다시 채워 넣을 때 쓰는 짧은 표기. 정수는 소수점 없이 쓴다.
pub fn format_plain(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        format_fixed(value, 0)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_infinity(s: &str) -> Option<f64> {
    match s {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn leading_infinity(s: &str) -> Option<f64> {
    if s.starts_with("Infinity") || s.starts_with("+Infinity") {
        Some(f64::INFINITY)
    } else if s.starts_with("-Infinity") {
        Some(f64::NEG_INFINITY)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_rules() {
        assert_eq!(parse_number(" 48 "), 48.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("1e2"), 100.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("nan").is_nan());
        assert!(parse_number("1-2").is_nan());
    }

    #[test]
    fn leading_float_rules() {
        assert_eq!(parse_leading_float("0.05x"), 0.05);
        assert_eq!(parse_leading_float("  42"), 42.0);
        assert_eq!(parse_leading_float("3."), 3.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
        assert_eq!(parse_leading_float("2e-1kg"), 0.2);
        assert_eq!(parse_leading_float("Infinityish"), f64::INFINITY);
        assert!(parse_leading_float("").is_nan());
        assert!(parse_leading_float("abc").is_nan());
        assert!(parse_leading_float("-.").is_nan());
    }

    #[test]
    fn fixed_formatting() {
        assert_eq!(format_fixed(250.0, 2), "250.00");
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
        assert_eq!(format_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 2), "-Infinity");
        assert_eq!(format_plain(48.0), "48");
        assert_eq!(format_plain(0.025), "0.025");
    }
}
