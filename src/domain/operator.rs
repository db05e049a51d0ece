// ============================================================================
// Operators
// Binary and unary operations, plus the pending-operator slot
// ============================================================================

use crate::numeric::{CalcError, CalcResult};
use rust_decimal::{Decimal, MathematicalOps};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four binary operations, displayed with the keypad symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Map a keypad symbol to an operation.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "×" => Some(BinaryOp::Multiply),
            "÷" => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    /// The display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
        }
    }

    /// Apply the operation.
    ///
    /// # Errors
    /// `DivisionByZero` for `÷ 0`, `Overflow` when the result leaves the
    /// representable range.
    pub fn apply(&self, a: Decimal, b: Decimal) -> CalcResult<Decimal> {
        match self {
            BinaryOp::Add => a.checked_add(b).ok_or(CalcError::Overflow),
            BinaryOp::Subtract => a.checked_sub(b).ok_or(CalcError::Overflow),
            BinaryOp::Multiply => a.checked_mul(b).ok_or(CalcError::Overflow),
            BinaryOp::Divide => a.checked_div(b).ok_or_else(|| {
                if b.is_zero() {
                    CalcError::DivisionByZero
                } else {
                    CalcError::Overflow
                }
            }),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Unary (Advanced Math) Operations
// ============================================================================

/// The advanced-math operations, labelled the way the original keypad
/// renders them: `1/(x)`, `√(x)`, `sqr(x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    Reciprocal,
    SquareRoot,
    Square,
}

impl UnaryOp {
    /// Map a keypad label to an operation.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "1/" => Some(UnaryOp::Reciprocal),
            "√" => Some(UnaryOp::SquareRoot),
            "sqr" => Some(UnaryOp::Square),
            _ => None,
        }
    }

    /// The display label used in `<label>(<operand>)` expressions.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Reciprocal => "1/",
            UnaryOp::SquareRoot => "√",
            UnaryOp::Square => "sqr",
        }
    }

    /// Apply the operation.
    ///
    /// # Errors
    /// `DivisionByZero` for the reciprocal of zero, `InvalidDomain` for the
    /// square root of a negative value, `Overflow` when squaring leaves the
    /// representable range.
    pub fn apply(&self, v: Decimal) -> CalcResult<Decimal> {
        match self {
            UnaryOp::Reciprocal => Decimal::ONE.checked_div(v).ok_or_else(|| {
                if v.is_zero() {
                    CalcError::DivisionByZero
                } else {
                    CalcError::Overflow
                }
            }),
            UnaryOp::SquareRoot => v.sqrt().ok_or(CalcError::InvalidDomain),
            UnaryOp::Square => v.checked_mul(v).ok_or(CalcError::Overflow),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Pending Operator Slot
// ============================================================================

/// The operation awaiting its second operand.
///
/// `Equals` is the finalized sentinel: the last computation is complete and
/// no further chaining is pending, so a repeated equals press is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActiveOperator {
    /// No operator selected
    #[default]
    Idle,
    /// A binary operation waiting for its second operand
    Binary(BinaryOp),
    /// Result finalized by equals
    Equals,
}

impl ActiveOperator {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveOperator::Idle)
    }

    #[inline]
    pub fn is_equals(&self) -> bool {
        matches!(self, ActiveOperator::Equals)
    }

    /// The pending binary operation, if one is set.
    pub fn binary(&self) -> Option<BinaryOp> {
        match self {
            ActiveOperator::Binary(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for ActiveOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveOperator::Idle => Ok(()),
            ActiveOperator::Binary(op) => f.write_str(op.symbol()),
            ActiveOperator::Equals => f.write_str("="),
        }
    }
}
