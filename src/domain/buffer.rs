// ============================================================================
// Input Buffer
// The in-progress number being typed, as a structured literal
// ============================================================================

use crate::numeric::Value;
use rust_decimal::Decimal;
use smallvec::{smallvec, SmallVec};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single keypad token: one digit or the decimal-point marker.
///
/// Digit entry is typed at the boundary, so malformed input (letters, stray
/// symbols) is unrepresentable and needs no error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputToken {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Point,
}

impl InputToken {
    /// Map a keypad character to a token. Returns `None` for anything that
    /// is not a digit or the decimal point.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(InputToken::Digit(c as u8 - b'0')),
            '.' => Some(InputToken::Point),
            _ => None,
        }
    }
}

// ============================================================================
// Pending Literal
// ============================================================================

/// A number in the middle of being typed: sign, integer digits, and the
/// fractional digits once the point has been pressed.
///
/// Keeping the digits structured (instead of scanning a string) is what makes
/// the digit-count and decimal-point guards trivial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLiteral {
    negative: bool,
    integer: SmallVec<[u8; 12]>,
    fraction: Option<SmallVec<[u8; 10]>>,
}

impl PendingLiteral {
    /// The literal `"0"`.
    pub fn zero() -> Self {
        Self {
            negative: false,
            integer: smallvec![0],
            fraction: None,
        }
    }

    /// Start a fresh literal from the first token: the point yields `"0."`,
    /// a digit yields itself.
    pub fn from_token(token: InputToken) -> Self {
        match token {
            InputToken::Point => Self {
                negative: false,
                integer: smallvec![0],
                fraction: Some(SmallVec::new()),
            },
            InputToken::Digit(d) => Self {
                negative: false,
                integer: smallvec![d],
                fraction: None,
            },
        }
    }

    /// Append a token. The caller is responsible for the entry guards
    /// (digit cap, duplicate point, redundant zero).
    pub fn push(&mut self, token: InputToken) {
        match token {
            InputToken::Point => {
                if self.fraction.is_none() {
                    self.fraction = Some(SmallVec::new());
                }
            },
            InputToken::Digit(d) => match &mut self.fraction {
                Some(frac) => frac.push(d),
                None => self.integer.push(d),
            },
        }
    }

    /// Remove the last character; an emptied literal resets to `"0"`.
    pub fn pop(&mut self) {
        match &mut self.fraction {
            Some(frac) if !frac.is_empty() => {
                frac.pop();
            },
            Some(_) => self.fraction = None,
            None => {
                self.integer.pop();
                if self.integer.is_empty() {
                    *self = Self::zero();
                }
            },
        }
    }

    /// Number of significant digits (sign and point excluded).
    pub fn digit_count(&self) -> usize {
        self.integer.len() + self.fraction.as_ref().map_or(0, |f| f.len())
    }

    /// Whether the decimal point has been typed.
    pub fn has_point(&self) -> bool {
        self.fraction.is_some()
    }

    /// Whether the literal reads exactly `"0"`.
    pub fn is_zero_text(&self) -> bool {
        !self.negative && self.fraction.is_none() && matches!(self.integer.as_slice(), [0])
    }

    /// Whether the literal denotes the number zero (`"0."`, `"0.00"`, ...).
    pub fn is_zero_value(&self) -> bool {
        self.integer.iter().all(|&d| d == 0)
            && self.fraction.as_ref().map_or(true, |f| f.iter().all(|&d| d == 0))
    }

    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The numeric value of the literal.
    pub fn to_decimal(&self) -> Decimal {
        let mut mantissa: i128 = 0;
        for &d in &self.integer {
            mantissa = mantissa * 10 + d as i128;
        }
        let mut scale: u32 = 0;
        if let Some(frac) = &self.fraction {
            for &d in frac.iter() {
                mantissa = mantissa * 10 + d as i128;
                scale += 1;
            }
        }
        if self.negative {
            mantissa = -mantissa;
        }
        Decimal::from_i128_with_scale(mantissa, scale)
    }

    /// Parse a plain decimal rendering back into a literal. Returns `None`
    /// for anything that is not sign + digits + optional point + digits.
    pub fn parse_plain(text: &str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if rest.is_empty() {
            return None;
        }

        let mut literal = Self {
            negative,
            integer: SmallVec::new(),
            fraction: None,
        };
        for c in rest.chars() {
            match c {
                '0'..='9' => literal.push(InputToken::Digit(c as u8 - b'0')),
                '.' if !literal.has_point() => literal.push(InputToken::Point),
                _ => return None,
            }
        }
        if literal.integer.is_empty() {
            literal.integer.push(0);
        }
        Some(literal)
    }
}

impl fmt::Display for PendingLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        for d in &self.integer {
            write!(f, "{}", d)?;
        }
        if let Some(frac) = &self.fraction {
            f.write_str(".")?;
            for d in frac.iter() {
                write!(f, "{}", d)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tagged Input Buffer
// ============================================================================

/// The input buffer: either a literal being typed, or a value produced by a
/// computation whose display text is preserved verbatim (scientific notation
/// included).
#[derive(Debug, Clone, PartialEq)]
pub enum InputBuffer {
    Literal(PendingLiteral),
    Resolved(Value),
}

impl InputBuffer {
    /// The empty-calculator buffer, `"0"`.
    pub fn zero() -> Self {
        InputBuffer::Literal(PendingLiteral::zero())
    }

    /// Start a fresh literal from a token.
    pub fn from_token(token: InputToken) -> Self {
        InputBuffer::Literal(PendingLiteral::from_token(token))
    }

    /// Wrap a computed value.
    pub fn resolved(value: Value) -> Self {
        InputBuffer::Resolved(value)
    }

    /// The buffer text as shown in the result display.
    pub fn text(&self) -> String {
        match self {
            InputBuffer::Literal(lit) => lit.to_string(),
            InputBuffer::Resolved(value) => value.text().to_string(),
        }
    }

    /// Number of significant digits currently in the buffer.
    pub fn digit_count(&self) -> usize {
        match self {
            InputBuffer::Literal(lit) => lit.digit_count(),
            InputBuffer::Resolved(value) => {
                value.text().chars().filter(|c| c.is_ascii_digit()).count()
            },
        }
    }

    /// Whether the buffer already contains a decimal point.
    pub fn has_point(&self) -> bool {
        match self {
            InputBuffer::Literal(lit) => lit.has_point(),
            InputBuffer::Resolved(value) => value.text().contains('.'),
        }
    }

    /// Whether the buffer reads exactly `"0"`.
    pub fn is_zero_entry(&self) -> bool {
        match self {
            InputBuffer::Literal(lit) => lit.is_zero_text(),
            InputBuffer::Resolved(value) => value.text() == "0",
        }
    }

    /// Whether the buffer denotes the number zero.
    pub fn is_zero_value(&self) -> bool {
        match self {
            InputBuffer::Literal(lit) => lit.is_zero_value(),
            InputBuffer::Resolved(value) => value.is_zero(),
        }
    }

    /// Append a token. A resolved plain value re-enters literal editing; a
    /// resolved scientific value cannot be extended and restarts from the
    /// token.
    pub fn push(&mut self, token: InputToken) {
        match self {
            InputBuffer::Literal(lit) => lit.push(token),
            InputBuffer::Resolved(value) => {
                let mut literal = PendingLiteral::parse_plain(value.text())
                    .unwrap_or_else(PendingLiteral::zero);
                literal.push(token);
                *self = InputBuffer::Literal(literal);
            },
        }
    }

    /// Backspace. A resolved value whose trimmed text no longer parses
    /// resets to `"0"`.
    pub fn pop(&mut self) {
        match self {
            InputBuffer::Literal(lit) => lit.pop(),
            InputBuffer::Resolved(value) => {
                let mut text = value.text().to_string();
                text.pop();
                let reparsed = text
                    .parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(&text));
                *self = match reparsed {
                    Ok(num) if !text.is_empty() => {
                        InputBuffer::Resolved(Value::from_parts(num, text))
                    },
                    _ => InputBuffer::zero(),
                };
            },
        }
    }

    /// Numerically negate the buffer. The caller guards the zero no-op.
    pub fn toggle_sign(&mut self) {
        match self {
            InputBuffer::Literal(lit) => {
                let negated = !lit.is_negative();
                lit.set_negative(negated);
            },
            InputBuffer::Resolved(value) => {
                let num = -value.decimal();
                let text = match value.text().strip_prefix('-') {
                    Some(rest) => rest.to_string(),
                    None => format!("-{}", value.text()),
                };
                *self = InputBuffer::Resolved(Value::from_parts(num, text));
            },
        }
    }

    /// Convert the buffer into a committed value. Literals are parsed from
    /// their structured form; resolved values pass through verbatim.
    pub fn resolve(&self) -> Value {
        match self {
            InputBuffer::Literal(lit) => Value::plain(lit.to_decimal()),
            InputBuffer::Resolved(value) => value.clone(),
        }
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn digits(s: &str) -> InputBuffer {
        let mut chars = s.chars();
        let first = InputToken::from_char(chars.next().unwrap()).unwrap();
        let mut buffer = InputBuffer::from_token(first);
        for c in chars {
            buffer.push(InputToken::from_char(c).unwrap());
        }
        buffer
    }

    #[test]
    fn test_zero_buffer() {
        let buffer = InputBuffer::zero();
        assert_eq!(buffer.text(), "0");
        assert!(buffer.is_zero_entry());
        assert!(buffer.is_zero_value());
        assert_eq!(buffer.digit_count(), 1);
    }

    #[test]
    fn test_from_token_point_starts_zero_point() {
        let buffer = InputBuffer::from_token(InputToken::Point);
        assert_eq!(buffer.text(), "0.");
        assert!(!buffer.is_zero_entry());
        assert!(buffer.is_zero_value());
        assert!(buffer.has_point());
    }

    #[test]
    fn test_push_builds_literal() {
        let mut buffer = InputBuffer::from_token(InputToken::Digit(3));
        buffer.push(InputToken::Point);
        buffer.push(InputToken::Digit(1));
        buffer.push(InputToken::Digit(4));
        assert_eq!(buffer.text(), "3.14");
        assert_eq!(buffer.digit_count(), 3);
        assert_eq!(buffer.resolve().decimal(), Decimal::from_str("3.14").unwrap());
    }

    #[test]
    fn test_pop_walks_back_through_point() {
        let mut buffer = InputBuffer::from_token(InputToken::Digit(5));
        buffer.push(InputToken::Point);
        buffer.push(InputToken::Digit(2));
        buffer.pop();
        assert_eq!(buffer.text(), "5.");
        buffer.pop();
        assert_eq!(buffer.text(), "5");
        buffer.pop();
        assert_eq!(buffer.text(), "0");
    }

    #[test]
    fn test_pop_on_negative_single_digit_resets() {
        let mut buffer = InputBuffer::from_token(InputToken::Digit(5));
        buffer.toggle_sign();
        assert_eq!(buffer.text(), "-5");
        buffer.pop();
        assert_eq!(buffer.text(), "0");
    }

    #[test]
    fn test_toggle_sign_literal() {
        let mut buffer = InputBuffer::from_token(InputToken::Digit(7));
        buffer.toggle_sign();
        assert_eq!(buffer.text(), "-7");
        buffer.toggle_sign();
        assert_eq!(buffer.text(), "7");
    }

    #[test]
    fn test_toggle_sign_resolved_keeps_rendering() {
        let value = Value::from_parts(
            Decimal::from_str("15000000000").unwrap(),
            "1.5e+10".to_string(),
        );
        let mut buffer = InputBuffer::resolved(value);
        buffer.toggle_sign();
        assert_eq!(buffer.text(), "-1.5e+10");
        assert_eq!(
            buffer.resolve().decimal(),
            Decimal::from_str("-15000000000").unwrap()
        );
    }

    #[test]
    fn test_resolved_passes_through_verbatim() {
        let value = Value::from_parts(
            Decimal::from_str("15000000000").unwrap(),
            "1.5e+10".to_string(),
        );
        let buffer = InputBuffer::resolved(value.clone());
        assert_eq!(buffer.resolve(), value);
        assert_eq!(buffer.digit_count(), 3);
    }

    #[test]
    fn test_push_on_resolved_plain_reenters_editing() {
        let mut buffer = InputBuffer::resolved(Value::plain(Decimal::from(20)));
        buffer.push(InputToken::Digit(5));
        assert_eq!(buffer.text(), "205");
    }

    #[test]
    fn test_pop_on_resolved_scientific() {
        let value = Value::from_parts(
            Decimal::from_str("15000000000").unwrap(),
            "1.5e+10".to_string(),
        );
        let mut buffer = InputBuffer::resolved(value);
        buffer.pop();
        assert_eq!(buffer.text(), "1.5e+1");
        assert_eq!(buffer.resolve().decimal(), Decimal::from(15));
    }

    #[test]
    fn test_resolve_normalizes_literal() {
        let buffer = digits("0.");
        assert_eq!(buffer.resolve().text(), "0");
        let buffer = digits("2.50");
        assert_eq!(buffer.resolve().text(), "2.5");
    }

    proptest! {
        // Entry fidelity: a digit sequence reads back as its concatenation.
        #[test]
        fn prop_digit_concatenation(seq in proptest::collection::vec(0u8..=9, 1..10)) {
            let mut buffer = InputBuffer::from_token(InputToken::Digit(seq[0]));
            for &d in &seq[1..] {
                buffer.push(InputToken::Digit(d));
            }
            let expected: String = seq.iter().map(|d| (b'0' + d) as char).collect();
            prop_assert_eq!(buffer.text(), expected);
        }

        // The literal never holds two points, and its text always parses.
        #[test]
        fn prop_literal_stays_numeric(tokens in proptest::collection::vec(
            prop_oneof![
                (0u8..=9).prop_map(InputToken::Digit),
                Just(InputToken::Point),
            ],
            0..20,
        )) {
            let mut buffer = InputBuffer::zero();
            for token in tokens {
                // Mirror the engine guard for duplicate points
                if token == InputToken::Point && buffer.has_point() {
                    continue;
                }
                buffer.push(token);
            }
            let text = buffer.text();
            prop_assert!(text.matches('.').count() <= 1);
            prop_assert!(buffer.resolve().text().parse::<Decimal>().is_ok());
            prop_assert_eq!(
                buffer.digit_count(),
                text.chars().filter(|c| c.is_ascii_digit()).count()
            );
        }
    }
}
