//! Numeric helpers shared by the resolver and the layout calculator.

use crate::constants::{FALLBACK_RESOLUTION, FLOAT_EPSILON, MAX_RESOLUTION, MIN_RESOLUTION};

/// Rounds `value` to the nearest multiple of `multiple`.
///
/// The result is never smaller than one multiple, so small inputs round up
/// instead of collapsing to zero. A NaN or non-positive `multiple` leaves the
/// value unchanged.
///
/// # Arguments
///
/// * `value` - The value to round
/// * `multiple` - The granularity to round to
///
/// # Returns
///
/// The rounded value
pub fn round_to_multiple(value: f64, multiple: f64) -> f64 {
    if multiple.is_nan() || multiple <= 0.0 {
        return value;
    }
    multiple.max((value / multiple).round() * multiple)
}

/// [`round_to_multiple`] with halfway quotients rounded to the even
/// multiple, so `160` by `64` gives `128` rather than `192`.
///
/// Used for the node's executed output, which rounds ties to even.
pub fn round_to_multiple_even(value: f64, multiple: f64) -> f64 {
    if multiple.is_nan() || multiple <= 0.0 {
        return value;
    }
    multiple.max((value / multiple).round_ties_even() * multiple)
}

/// Parses the leading integer of `raw`, the way editor text fields read
/// numbers: leading whitespace, an optional sign, then digits. Anything after
/// the digits is ignored (`"100.7"` reads as 100).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long inputs, they get clamped by the callers anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses `raw` as an integer resolution and clamps it into `[min, max]`.
///
/// # Arguments
///
/// * `raw` - Text of the width or height field
/// * `fallback` - Value returned when `raw` holds no integer
/// * `min` - Lower clamp bound
/// * `max` - Upper clamp bound
pub fn clamp_resolution_with(raw: &str, fallback: u32, min: u32, max: u32) -> u32 {
    match parse_leading_int(raw) {
        Some(value) => value.clamp(i64::from(min), i64::from(max)) as u32,
        None => fallback,
    }
}

/// [`clamp_resolution_with`] using the default fallback (512) and the
/// accepted range 64..=8192.
pub fn clamp_resolution(raw: &str) -> u32 {
    clamp_resolution_with(raw, FALLBACK_RESOLUTION, MIN_RESOLUTION, MAX_RESOLUTION)
}

/// Absolute-difference comparison with an explicit tolerance.
pub fn floats_equal_with(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Absolute-difference comparison used for aspect ratios, so near-square
/// images do not flip between the two fitting branches.
pub fn floats_equal(a: f64, b: f64) -> bool {
    floats_equal_with(a, b, FLOAT_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_multiple_lands_on_a_multiple() {
        for multiple in [1.0, 2.0, 8.0, 64.0] {
            for value in [0.0, 1.0, 31.0, 100.0, 513.0, 8191.0] {
                let rounded = round_to_multiple(value, multiple);
                assert_eq!(rounded % multiple, 0.0, "{value} by {multiple}");
                assert!(rounded >= multiple, "{value} by {multiple}");
            }
        }
    }

    #[test]
    fn round_to_multiple_never_collapses_to_zero() {
        assert_eq!(round_to_multiple(3.0, 64.0), 64.0);
        assert_eq!(round_to_multiple(0.0, 8.0), 8.0);
    }

    #[test]
    fn round_to_multiple_rounds_to_nearest() {
        assert_eq!(round_to_multiple(100.0, 64.0), 128.0);
        assert_eq!(round_to_multiple(95.0, 64.0), 64.0);
        assert_eq!(round_to_multiple(96.0, 64.0), 128.0);
        assert_eq!(round_to_multiple(160.0, 64.0), 192.0);
        assert_eq!(round_to_multiple(520.0, 8.0), 520.0);
    }

    #[test]
    fn round_to_multiple_even_breaks_ties_to_even() {
        assert_eq!(round_to_multiple_even(160.0, 64.0), 128.0);
        assert_eq!(round_to_multiple_even(96.0, 64.0), 128.0);
        assert_eq!(round_to_multiple_even(3.0, 2.0), 4.0);
        assert_eq!(round_to_multiple_even(5.0, 2.0), 4.0);
        assert_eq!(round_to_multiple_even(100.0, 64.0), 128.0);
        assert_eq!(round_to_multiple_even(10.0, 64.0), 64.0);
        assert_eq!(round_to_multiple_even(100.0, 0.0), 100.0);
    }

    #[test]
    fn round_to_multiple_ignores_invalid_multiple() {
        assert_eq!(round_to_multiple(100.0, 0.0), 100.0);
        assert_eq!(round_to_multiple(100.0, -8.0), 100.0);
        assert_eq!(round_to_multiple(100.0, f64::NAN), 100.0);
    }

    #[test]
    fn parse_leading_int_reads_prefix() {
        assert_eq!(parse_leading_int("512"), Some(512));
        assert_eq!(parse_leading_int("  768px"), Some(768));
        assert_eq!(parse_leading_int("100.7"), Some(100));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("+12"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn clamp_resolution_falls_back_on_garbage() {
        assert_eq!(clamp_resolution("abc"), 512);
        assert_eq!(clamp_resolution(""), 512);
        assert_eq!(clamp_resolution_with("abc", 1024, 64, 8192), 1024);
    }

    #[test]
    fn clamp_resolution_clamps_into_range() {
        assert_eq!(clamp_resolution("99999"), 8192);
        assert_eq!(clamp_resolution("1"), 64);
        assert_eq!(clamp_resolution("-300"), 64);
        assert_eq!(clamp_resolution("1000"), 1000);
        assert_eq!(clamp_resolution("99999999999999999999999"), 8192);
    }

    #[test]
    fn floats_equal_uses_tolerance() {
        assert!(floats_equal(4.0 / 3.0, 240.0 / 180.0));
        assert!(!floats_equal(1.0, 1.0 + 1e-6));
        assert!(floats_equal_with(1.0, 1.05, 0.1));
    }
}
