// ============================================================================
// Calculator State
// The entry-phase state machine and the engine's mutable fields
// ============================================================================

use crate::domain::buffer::InputBuffer;
use crate::domain::operator::ActiveOperator;
use crate::numeric::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Entry Phase State Machine
// ============================================================================

/// Where the user is in the entry cycle.
///
/// Transitions:
/// - `Empty -> EnteringFirst` on the first digit
/// - `EnteringFirst -> OperatorPending` on an operator press (the typed
///   number is committed as the first operand)
/// - `OperatorPending -> EnteringSecond` on the next digit
/// - `EnteringSecond -> OperatorPending` on a chained operator press (the
///   pending operation is resolved into the first operand)
/// - `EnteringSecond -> ResultShown` on equals
/// - `ResultShown -> EnteringFirst` on a digit (the engine resets first), or
///   `-> OperatorPending` on an operator (chaining from the result)
/// - `clear_all` returns to `Empty` from anywhere
///
/// A unary operation lands in `ResultShown` when no second operand is
/// committed, otherwise in `OperatorPending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntryPhase {
    /// Untouched (or fully cleared) calculator
    #[default]
    Empty,
    /// Typing the first operand
    EnteringFirst,
    /// Operator selected; the next digit starts the second operand
    OperatorPending,
    /// Typing the second operand
    EnteringSecond,
    /// The last visible action was a finalized computation
    ResultShown,
}

impl EntryPhase {
    /// Whether the next digit starts a fresh buffer rather than appending.
    #[inline]
    pub fn is_fresh_entry(&self) -> bool {
        matches!(self, EntryPhase::OperatorPending | EntryPhase::ResultShown)
    }

    /// Whether the last visible action was a completed computation.
    #[inline]
    pub fn is_result_shown(&self) -> bool {
        matches!(self, EntryPhase::ResultShown)
    }
}

// ============================================================================
// Engine State
// ============================================================================

/// All mutable state of the calculator engine.
///
/// Mutation happens exclusively through the engine's entry points; the
/// `expression` field is the engine's own copy of the last expression text it
/// wrote, kept so display sinks stay write-only.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    pub(crate) buffer: InputBuffer,
    pub(crate) first: Option<Value>,
    pub(crate) second: Option<Value>,
    pub(crate) operator: ActiveOperator,
    pub(crate) phase: EntryPhase,
    pub(crate) expression: String,
}

impl CalculatorState {
    /// The empty-calculator state.
    pub fn new() -> Self {
        Self {
            buffer: InputBuffer::zero(),
            first: None,
            second: None,
            operator: ActiveOperator::Idle,
            phase: EntryPhase::Empty,
            expression: String::new(),
        }
    }

    /// Reset every field back to the empty-calculator state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// A read-only view of the engine state for host shells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorSnapshot {
    /// The expression display text
    pub expression: String,
    /// The result display text (the live buffer)
    pub result: String,
    /// First operand, if committed
    pub first: Option<Value>,
    /// Second operand, if committed
    pub second: Option<Value>,
    /// The pending operator slot
    pub operator: ActiveOperator,
    /// The entry phase
    pub phase: EntryPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_phases() {
        assert!(!EntryPhase::Empty.is_fresh_entry());
        assert!(!EntryPhase::EnteringFirst.is_fresh_entry());
        assert!(EntryPhase::OperatorPending.is_fresh_entry());
        assert!(!EntryPhase::EnteringSecond.is_fresh_entry());
        assert!(EntryPhase::ResultShown.is_fresh_entry());
    }

    #[test]
    fn test_result_shown_phase() {
        assert!(EntryPhase::ResultShown.is_result_shown());
        assert!(!EntryPhase::OperatorPending.is_result_shown());
    }

    #[test]
    fn test_reset() {
        let mut state = CalculatorState::new();
        state.first = Some(Value::zero());
        state.operator = ActiveOperator::Equals;
        state.phase = EntryPhase::ResultShown;
        state.expression = "1 + 1 =".to_string();

        state.reset();
        assert!(state.first.is_none());
        assert!(state.operator.is_idle());
        assert_eq!(state.phase, EntryPhase::Empty);
        assert!(state.expression.is_empty());
        assert_eq!(state.buffer.text(), "0");
    }
}
