//! Decimal rounding, strict number parsing and number formatting.

use super::DIGITIZE_PRECISION;
use crate::error::{Error, Result};

/// Rounds `value` to `precision` decimal digits.
///
/// The decimal point is moved by rewriting the exponent of the number's
/// scientific notation instead of multiplying by a power of ten, so inputs
/// such as `1.005` round to `1.01` rather than `1.0`. Halfway cases round
/// away from zero. Non-finite inputs, and inputs whose shifted form would
/// overflow, are returned unchanged.
#[must_use]
pub fn round_number(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let shifted = shift_decimal(value, precision);
    if !shifted.is_finite() {
        return value;
    }
    let rounded = shift_decimal(shifted.round(), -precision);
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Moves the decimal point of `value` by `places` (positive: to the right).
fn shift_decimal(value: f64, places: i32) -> f64 {
    let text = format!("{value:e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return value * 10f64.powi(places);
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value * 10f64.powi(places);
    };
    format!("{mantissa}e{}", exponent.saturating_add(places))
        .parse::<f64>()
        .unwrap_or_else(|_| value * 10f64.powi(places))
}

/// Rounds to [`DIGITIZE_PRECISION`] decimals, enough for screen digitizing.
#[must_use]
pub fn fix_dec(value: f64) -> f64 {
    round_number(value, DIGITIZE_PRECISION)
}

/// Parses a decimal string into a finite `f64`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidNumberFormat`] carrying `input` when the text is
/// not a number or denotes NaN or an infinity.
pub fn parse_number_strict(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            crate::log::debug!(input, "rejecting non-numeric coordinate");
            Err(Error::InvalidNumberFormat {
                input: input.to_owned(),
            })
        }
    }
}

/// Returns `true` iff `input` parses to a finite number.
#[must_use]
pub fn is_numeric(input: &str) -> bool {
    parse_number_strict(input).is_ok()
}

/// Formats a number in its shortest round-trip form (`1`, `0.5`, `-2.25`).
///
/// Negative zero is printed as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_avoids_binary_artifacts() {
        assert_eq!(round_number(1.005, 2), 1.01);
        assert_eq!(round_number(2.345, 2), 2.35);
        assert_eq!(round_number(1.234_567_890_123, 9), 1.234_567_89);
    }

    #[test]
    fn round_negative_values() {
        assert_eq!(round_number(-1.005, 2), -1.01);
        assert_eq!(round_number(-0.4, 0), 0.0);
        assert_eq!(round_number(-2.5, 0), -3.0);
    }

    #[test]
    fn round_tiny_and_huge_values() {
        assert_eq!(round_number(1e-12, 9), 0.0);
        assert_eq!(round_number(1e308, 9), 1e308);
        assert_eq!(round_number(f64::MAX, 2), f64::MAX);
        assert!(round_number(f64::NAN, 2).is_nan());
    }

    #[test]
    fn round_integer_passthrough() {
        assert_eq!(round_number(42.0, 2), 42.0);
        assert_eq!(round_number(0.0, 9), 0.0);
    }

    #[test]
    fn fix_dec_keeps_two_decimals() {
        assert_eq!(fix_dec(3.14159), 3.14);
    }

    #[test]
    fn parse_accepts_decimal_strings() {
        assert_eq!(parse_number_strict("3.5").unwrap(), 3.5);
        assert_eq!(parse_number_strict(" -2 ").unwrap(), -2.0);
        assert_eq!(parse_number_strict("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn parse_rejects_garbage_and_non_finite() {
        for input in ["", "abc", "12abc", "NaN", "inf", "-infinity"] {
            let err = parse_number_strict(input).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidNumberFormat {
                    input: input.to_owned()
                }
            );
        }
    }

    #[test]
    fn numeric_predicate() {
        assert!(is_numeric("0.25"));
        assert!(!is_numeric("zero"));
    }

    #[test]
    fn format_shortest_form() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-2.25), "-2.25");
    }
}
