//! Numeric parsing and fixed-point formatting.
//!
//! Two parsers with different strictness are provided:
//! - [`parse_leading_float`] reads the longest numeric prefix and ignores
//!   trailing text (`"42kg"` is 42). Used by the `number` transformation.
//! - [`parse_number`] requires the whole trimmed value to be numeric. Used
//!   by validation.

/// Digits printed when checking whether a value sits exactly on a rounding
/// tie. Large enough for the exact expansion of any finite `f64`.
const EXACT_DIGITS: usize = 1100;

/// Largest fraction length accepted by [`format_fixed`].
pub const MAX_DECIMAL_PLACES: u32 = 100;

/// Parse the longest numeric prefix of `value`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent and `Infinity`. Returns `None`
/// when no digits are found.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let length = scan_decimal(trimmed)?;
    parse_literal(&trimmed[..length])
}

/// Parse a whole value as a number.
///
/// Handles:
/// - Decimal literals: "123", "-45.67", ".5", "1e3"
/// - Hex, octal and binary literals: "0x1F", "0o17", "0b101"
/// - "Infinity" with an optional sign
/// - Surrounding whitespace
///
/// Blank values parse as zero.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if let Some(number) = parse_radix(trimmed) {
        return Some(number);
    }

    match scan_decimal(trimmed) {
        Some(length) if length == trimmed.len() => parse_literal(trimmed),
        _ => None,
    }
}

/// Check if a string represents a valid numeric value.
pub fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// Format `number` with exactly `places` fraction digits.
///
/// Values lying exactly halfway between two outputs round away from zero.
/// Returns `None` when `places` exceeds [`MAX_DECIMAL_PLACES`].
pub fn format_fixed(number: f64, places: u32) -> Option<String> {
    if places > MAX_DECIMAL_PLACES {
        return None;
    }
    if number.is_nan() {
        return Some("NaN".to_string());
    }
    if number.is_infinite() {
        return Some(if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string());
    }
    // Negative zero prints without a sign.
    let number = if number == 0.0 { 0.0 } else { number };
    let places = places as usize;

    let probe = format!("{:.*}", places + 1, number.abs());
    if probe.ends_with('5') {
        let exact = format!("{:.*}", places + 1 + EXACT_DIGITS, number.abs());
        let tail = &exact[exact.len() - EXACT_DIGITS..];
        if tail.bytes().all(|b| b == b'0') {
            let truncated = &probe[..probe.len() - 1];
            let truncated = truncated.strip_suffix('.').unwrap_or(truncated);
            let rounded = increment_last_digit(truncated);
            return Some(if number < 0.0 {
                format!("-{rounded}")
            } else {
                rounded
            });
        }
    }

    Some(format!("{number:.places$}"))
}

/// Length of the longest decimal literal at the start of `s`.
fn scan_decimal(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }
    if s[pos..].starts_with("Infinity") {
        return Some(pos + "Infinity".len());
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }
    Some(pos)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_literal(literal: &str) -> Option<f64> {
    let unsigned = literal.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return Some(if literal.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    literal.parse().ok()
}

fn parse_radix(s: &str) -> Option<f64> {
    let lower = s.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Adds one unit in the last place of a non-negative decimal string.
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_prefix() {
        assert_eq!(parse_leading_float("42"), Some(42.0));
        assert_eq!(parse_leading_float("  -3.5kg"), Some(-3.5));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("Infinity and beyond"), Some(f64::INFINITY));
    }

    #[test]
    fn test_leading_prefix_invalid() {
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("nan"), None);
    }

    #[test]
    fn test_whole_value() {
        assert_eq!(parse_number(" 30 "), Some(30.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("1.5E-3"), Some(0.0015));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number(""), Some(0.0));
    }

    #[test]
    fn test_whole_value_invalid() {
        assert_eq!(parse_number("thirty"), None);
        assert_eq!(parse_number("30 years"), None);
        assert_eq!(parse_number("12.34.56"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("0x"), None);
        assert!(!is_numeric("1,234"));
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(3.14159, 2).as_deref(), Some("3.14"));
        assert_eq!(format_fixed(42.0, 0).as_deref(), Some("42"));
        assert_eq!(format_fixed(42.0, 3).as_deref(), Some("42.000"));
        assert_eq!(format_fixed(-0.0, 0).as_deref(), Some("0"));
        assert_eq!(format_fixed(f64::INFINITY, 2).as_deref(), Some("Infinity"));
    }

    #[test]
    fn test_format_fixed_ties_round_away_from_zero() {
        assert_eq!(format_fixed(0.5, 0).as_deref(), Some("1"));
        assert_eq!(format_fixed(2.5, 0).as_deref(), Some("3"));
        assert_eq!(format_fixed(-2.5, 0).as_deref(), Some("-3"));
        assert_eq!(format_fixed(0.125, 2).as_deref(), Some("0.13"));
        assert_eq!(format_fixed(9.5, 0).as_deref(), Some("10"));
        assert_eq!(format_fixed(9.95, 1).as_deref(), Some("9.9")); // 9.95 is stored below the tie
    }

    #[test]
    fn test_format_fixed_place_limit() {
        assert_eq!(format_fixed(1.5, MAX_DECIMAL_PLACES).map(|s| s.len()), Some(102));
        assert_eq!(format_fixed(1.5, MAX_DECIMAL_PLACES + 1), None);
        assert_eq!(format_fixed(0.5, 70_000), None);
        assert_eq!(format_fixed(1.5, u32::MAX), None);
    }
}
