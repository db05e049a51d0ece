// ============================================================================
// Display Values
// Numeric values paired with their display rendering
// ============================================================================

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A committed numeric value together with the exact text it is displayed as.
///
/// Results that were reformatted into scientific notation keep that rendering
/// verbatim: the value re-enters later calculations as the number the
/// scientific string denotes, never by re-parsing a decimal expansion.
///
/// # Example
/// ```
/// use calculator_engine::numeric::Value;
/// use rust_decimal::Decimal;
///
/// let v = Value::plain(Decimal::new(200, 1)); // 20.0
/// assert_eq!(v.text(), "20");
/// assert_eq!(v.decimal(), Decimal::from(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Value {
    num: Decimal,
    text: String,
}

impl Value {
    /// Zero, displayed as `"0"`.
    pub fn zero() -> Self {
        Self::plain(Decimal::ZERO)
    }

    /// Create from a decimal, rendering it in plain notation with trailing
    /// zeros stripped (`20.0` displays as `"20"`).
    pub fn plain(num: Decimal) -> Self {
        let num = num.normalize();
        Self {
            text: num.to_string(),
            num,
        }
    }

    /// Create from an already-rendered text and the value it denotes.
    pub fn from_parts(num: Decimal, text: String) -> Self {
        Self { num, text }
    }

    /// The numeric value.
    #[inline]
    pub fn decimal(&self) -> Decimal {
        self.num
    }

    /// The display rendering.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// Result Formatting Policy
// ============================================================================

/// Round a raw arithmetic result to the display precision.
///
/// Rounds half away from zero, one fractional digit short of the display
/// digit limit.
pub fn round_result(value: Decimal, precision: u32) -> Decimal {
    value
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Format a raw arithmetic result for display.
///
/// The value is rounded to `precision` fractional digits; if the rounded
/// magnitude then exceeds `scientific_threshold`, it is reformatted into
/// normalized scientific notation (see [`to_scientific_notation`]).
pub fn format_result(value: Decimal, precision: u32, scientific_threshold: Decimal) -> Value {
    let rounded = round_result(value, precision);
    if rounded.abs() > scientific_threshold {
        let (num, text) = to_scientific_notation(rounded, precision);
        Value::from_parts(num, text)
    } else {
        Value::plain(rounded)
    }
}

/// Reformat a value into normalized scientific notation.
///
/// The digit count of the truncated integer part determines the exponent;
/// the coefficient is `value / 10^(digits - 1)` rounded to `precision`
/// fractional digits. A single-character coefficient gets a trailing decimal
/// point appended for display consistency, so `1e+10` renders as `"1.e+10"`.
///
/// Returns the value the rendered string denotes (the coefficient rounding
/// is part of the result) alongside the `"<coefficient>e+<exponent>"` text.
pub fn to_scientific_notation(value: Decimal, precision: u32) -> (Decimal, String) {
    let digits = value.trunc().abs().to_string().len() as u32;
    let exponent = digits - 1;
    let scale = Decimal::from_i128_with_scale(10i128.pow(exponent), 0);

    let coefficient = round_result(value / scale, precision);
    let mut text = coefficient.to_string();
    if text.len() == 1 {
        text.push('.');
    }

    let denoted = (coefficient * scale).normalize();
    (denoted, format!("{}e+{}", text, exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_plain_strips_trailing_zeros() {
        assert_eq!(Value::plain(dec("20.0")).text(), "20");
        assert_eq!(Value::plain(dec("0.4900")).text(), "0.49");
        assert_eq!(Value::plain(dec("-7.10")).text(), "-7.1");
        assert_eq!(Value::zero().text(), "0");
    }

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(dec("3.3333333333333"), 9), dec("3.333333333"));
        // Half away from zero
        assert_eq!(round_result(dec("0.0000000015"), 9), dec("0.000000002"));
        assert_eq!(round_result(dec("-0.0000000015"), 9), dec("-0.000000002"));
    }

    #[test]
    fn test_format_below_threshold_stays_plain() {
        let threshold = dec("9000000000");
        let v = format_result(dec("8999999999"), 9, threshold);
        assert_eq!(v.text(), "8999999999");
        assert_eq!(v.decimal(), dec("8999999999"));
    }

    #[test]
    fn test_format_above_threshold_goes_scientific() {
        let threshold = dec("9000000000");
        let v = format_result(dec("15000000000"), 9, threshold);
        assert_eq!(v.text(), "1.5e+10");
        assert_eq!(v.decimal(), dec("15000000000"));
    }

    #[test]
    fn test_scientific_single_digit_coefficient() {
        let (num, text) = to_scientific_notation(dec("10000000000"), 9);
        assert_eq!(text, "1.e+10");
        assert_eq!(num, dec("10000000000"));
    }

    #[test]
    fn test_scientific_negative_value() {
        let (num, text) = to_scientific_notation(dec("-15000000000"), 9);
        assert_eq!(text, "-1.5e+10");
        assert_eq!(num, dec("-15000000000"));
    }

    #[test]
    fn test_scientific_coefficient_rounding_is_the_value() {
        // 12345678912.345 has an 11-digit integer part; the coefficient is
        // rounded to 9 fractional digits and the denoted value follows it.
        let (num, text) = to_scientific_notation(dec("12345678912.345"), 9);
        assert_eq!(text, "1.234567891e+10");
        assert_eq!(num, dec("12345678910"));
    }

    #[test]
    fn test_display_uses_text() {
        let v = Value::from_parts(dec("15000000000"), "1.5e+10".to_string());
        assert_eq!(v.to_string(), "1.5e+10");
    }
}
