// ============================================================================
// Calculation Errors
// Error types for calculator arithmetic operations
// ============================================================================

use std::fmt;

/// Errors that can terminate the current calculation.
///
/// Every variant clears the engine back to the empty state before it is
/// returned; the `Display` form is the user-facing alert text, so the host
/// shell can present it however it likes (modal, inline, log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalcError {
    /// Second operand is zero under division
    DivisionByZero,
    /// Finalized result magnitude exceeded the 19-digit display ceiling
    Overflow,
    /// Square root requested on a negative operand
    InvalidDomain,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::DivisionByZero => write!(f, "Error: Cannot divide by zero"),
            CalcError::Overflow => write!(f, "Error: Number too large!"),
            CalcError::InvalidDomain => write!(
                f,
                "Error: the square root of a negative number is not a real number"
            ),
        }
    }
}

impl std::error::Error for CalcError {}

/// Result type alias for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CalcError::DivisionByZero.to_string(),
            "Error: Cannot divide by zero"
        );
        assert_eq!(CalcError::Overflow.to_string(), "Error: Number too large!");
        assert_eq!(
            CalcError::InvalidDomain.to_string(),
            "Error: the square root of a negative number is not a real number"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CalcError::Overflow, CalcError::Overflow);
        assert_ne!(CalcError::Overflow, CalcError::DivisionByZero);
    }
}
