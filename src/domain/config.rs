// ============================================================================
// Display Configuration
// Digit limit and the formatting thresholds derived from it
// ============================================================================

use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display policy for the calculator.
///
/// The digit limit caps fresh entry at `digit_limit` significant digits;
/// results are rounded to one fractional digit less, and anything whose
/// magnitude exceeds `9 × 10^(digit_limit - 1)` is rendered in scientific
/// notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Maximum significant digits accepted during entry
    pub digit_limit: u32,
}

impl DisplayConfig {
    pub fn new(digit_limit: u32) -> Self {
        Self { digit_limit }
    }

    /// Fractional digits results are rounded to.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.digit_limit - 1
    }

    /// Magnitude above which results switch to scientific notation.
    pub fn scientific_threshold(&self) -> Decimal {
        Decimal::from_i128_with_scale(9 * 10i128.pow(self.digit_limit - 1), 0)
    }

    /// Magnitude above which a finalized result overflows the display.
    ///
    /// This is the 19-digit ceiling: 9.999999998 × 10^18.
    pub fn overflow_ceiling(&self) -> Decimal {
        Decimal::from_i128_with_scale(9_999_999_998_000_000_000, 0)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.digit_limit < 2 {
            return Err("digit limit must be at least 2".to_string());
        }
        if self.digit_limit > 28 {
            return Err("digit limit exceeds decimal precision (28)".to_string());
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { digit_limit: 10 }
    }
}
