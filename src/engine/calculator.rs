// ============================================================================
// Calculator Engine
// Core state machine driven by discrete user input events
// ============================================================================

use crate::domain::buffer::{InputBuffer, InputToken};
use crate::domain::config::DisplayConfig;
use crate::domain::operator::{ActiveOperator, BinaryOp, UnaryOp};
use crate::domain::state::{CalculatorSnapshot, CalculatorState, EntryPhase};
use crate::interfaces::{DisplayEvent, DisplaySink};
use crate::numeric::{format_result, round_result, CalcError, CalcResult, Value};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// The calculator engine.
///
/// Every public method corresponds to one user gesture and runs to
/// completion before the next event arrives; the engine takes `&mut self`,
/// so one-event-at-a-time dispatch is enforced by the borrow checker.
///
/// Failures (`DivisionByZero`, `Overflow`, `InvalidDomain`) clear the engine
/// back to the empty state and are returned as typed values whose `Display`
/// form is the user-facing alert text.
pub struct Calculator {
    state: CalculatorState,
    config: DisplayConfig,
    sink: Arc<dyn DisplaySink>,
}

impl Calculator {
    /// Create an engine with the default 10-digit display policy.
    pub fn new(sink: Arc<dyn DisplaySink>) -> Self {
        Self::with_config(DisplayConfig::default(), sink)
    }

    /// Create an engine with an explicit display policy.
    pub fn with_config(config: DisplayConfig, sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            state: CalculatorState::new(),
            config,
            sink,
        }
    }

    /// A read-only view of the engine state.
    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            expression: self.state.expression.clone(),
            result: self.state.buffer.text(),
            first: self.state.first.clone(),
            second: self.state.second.clone(),
            operator: self.state.operator,
            phase: self.state.phase,
        }
    }

    /// The numeric value of the live buffer (what the advanced-math keys
    /// operate on).
    pub fn current_value(&self) -> Decimal {
        self.state.buffer.resolve().decimal()
    }

    /// The display configuration.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    // ========================================================================
    // Buffer Editing Operations
    // ========================================================================

    /// Append one digit (or the decimal point) to the input buffer.
    ///
    /// Rejected as a no-op when the buffer is at the significant-digit cap,
    /// when a second decimal point is typed, or when the buffer is `"0"` and
    /// another zero arrives. A fresh-entry phase starts a new buffer instead
    /// of appending; if a result was showing, the previous calculation is
    /// discarded first.
    pub fn append_digit(&mut self, token: InputToken) {
        if let InputToken::Digit(d) = token {
            if d > 9 {
                return;
            }
        }

        let fresh = self.state.phase.is_fresh_entry();
        let at_cap = self.state.buffer.digit_count() >= self.config.digit_limit as usize;
        if at_cap && !fresh && token != InputToken::Point {
            return;
        }
        if self.state.buffer.has_point() && token == InputToken::Point && !fresh {
            return;
        }
        if self.state.buffer.is_zero_entry() && token == InputToken::Digit(0) {
            return;
        }

        // An advanced-math label is showing: the next digit starts over.
        if self.state.expression.contains('(') {
            self.state.phase = EntryPhase::ResultShown;
        }

        if self.state.phase.is_fresh_entry() || self.state.buffer.is_zero_entry() {
            if self.state.phase.is_result_shown() {
                self.clear_all();
            }
            self.state.buffer = InputBuffer::from_token(token);
            self.state.phase = if self.state.operator.is_idle() {
                EntryPhase::EnteringFirst
            } else {
                EntryPhase::EnteringSecond
            };
        } else {
            self.state.buffer.push(token);
        }

        self.emit_result(self.state.buffer.text());
    }

    /// Remove the last character of the buffer; a single-character buffer
    /// resets to `"0"`.
    pub fn delete_digit(&mut self) {
        self.state.buffer.pop();
        self.emit_result(self.state.buffer.text());
    }

    /// Reset the buffer to `"0"`, leaving operands and operator untouched.
    pub fn clear_entry(&mut self) {
        self.state.buffer = InputBuffer::zero();
        self.emit_result("0");
    }

    /// Reset every field to the empty-calculator state and blank both
    /// displays.
    pub fn clear_all(&mut self) {
        self.state.reset();
        self.emit_expression(String::new());
        self.emit_result("0");
    }

    /// Numerically negate the buffer; a zero buffer is left untouched.
    pub fn toggle_sign(&mut self) {
        if self.state.buffer.is_zero_value() {
            return;
        }
        self.state.buffer.toggle_sign();
        if self.state.phase.is_result_shown() {
            // The toggled value becomes the new implicit entry.
            self.emit_expression(String::new());
        }
        self.emit_result(self.state.buffer.text());
    }

    // ========================================================================
    // Binary Operator Pipeline
    // ========================================================================

    /// Select a binary operator.
    ///
    /// Resolves any outstanding operation first, so operators chain
    /// (`3 + 4 + 5 =`); repeated operator taps merely replace the pending
    /// operator without recomputation.
    ///
    /// # Errors
    /// `DivisionByZero` when the committed second operand is zero under a
    /// pending division; the newly pressed operator is discarded.
    pub fn operator_pressed(&mut self, op: BinaryOp) -> CalcResult<()> {
        self.commit_input();

        if self.is_division_by_zero() {
            return self.fail(CalcError::DivisionByZero);
        }

        if !self.state.phase.is_fresh_entry() {
            let result = match self.resolve_pending() {
                Ok(value) => value,
                Err(err) => return self.fail(err),
            };
            self.state.buffer = InputBuffer::resolved(result.clone());
            self.state.first = Some(result.clone());
            self.state.phase = EntryPhase::OperatorPending;
            self.emit_result(result.text());
        }

        self.state.operator = ActiveOperator::Binary(op);
        self.state.phase = EntryPhase::OperatorPending;
        let expression = compose(&[&self.first_text(), op.symbol()]);
        self.emit_expression(expression);
        Ok(())
    }

    /// Finalize the pending calculation.
    ///
    /// Equals is idempotent: a successful computation parks the engine on
    /// the equals sentinel, so pressing it again changes nothing. With no
    /// operator selected, the committed value is simply finalized as
    /// `"<first> ="`.
    ///
    /// # Errors
    /// `DivisionByZero` when the second operand is zero under division;
    /// `Overflow` when the result magnitude exceeds the display ceiling.
    /// Both clear the engine.
    pub fn equals(&mut self) -> CalcResult<()> {
        self.commit_input();

        if self.is_division_by_zero() {
            return self.fail(CalcError::DivisionByZero);
        }

        let op = match self.state.operator {
            // Result already finalized
            ActiveOperator::Equals => return Ok(()),
            ActiveOperator::Idle => {
                self.finalize_first();
                return Ok(());
            },
            ActiveOperator::Binary(op) => op,
        };

        // A pending operator without a committed second operand has nothing
        // to apply; finalize the first operand alone.
        let Some(second) = self.state.second.clone() else {
            self.finalize_first();
            return Ok(());
        };

        let first = self.state.first.clone().unwrap_or_else(Value::zero);
        let raw = match op.apply(first.decimal(), second.decimal()) {
            Ok(raw) => raw,
            Err(err) => return self.fail(err),
        };
        let result = format_result(
            raw,
            self.config.precision(),
            self.config.scientific_threshold(),
        );

        if result.decimal().abs() > self.config.overflow_ceiling() {
            return self.fail(CalcError::Overflow);
        }

        let expression = compose(&[first.text(), op.symbol(), second.text(), "="]);
        self.state.buffer = InputBuffer::resolved(result.clone());
        self.emit_expression(expression);
        self.emit_result(result.text());

        self.state.operator = ActiveOperator::Equals;
        self.state.phase = EntryPhase::ResultShown;
        // Re-commit the result as the new first operand: a following digit
        // starts over, a following operator chains from it.
        self.commit_input();
        Ok(())
    }

    // ========================================================================
    // Percent
    // ========================================================================

    /// Reinterpret the buffer as `first × (buffer / 100)` and commit it as
    /// the second operand.
    ///
    /// An exactly-zero percent result is instead re-committed through the
    /// operand gate as a new base value, and the first operand alone is
    /// shown in both displays.
    pub fn percent(&mut self) -> CalcResult<()> {
        let input = self.state.buffer.resolve();
        let base = self
            .state
            .first
            .as_ref()
            .map(|v| v.decimal())
            .unwrap_or(Decimal::ZERO);

        let ratio = match input.decimal().checked_div(Decimal::ONE_HUNDRED) {
            Some(ratio) => ratio,
            None => return self.fail(CalcError::Overflow),
        };
        let percent = match base.checked_mul(ratio) {
            Some(value) => Value::plain(value),
            None => return self.fail(CalcError::Overflow),
        };

        self.state.second = Some(percent.clone());
        self.state.buffer = InputBuffer::resolved(percent.clone());

        if percent.is_zero() {
            self.commit_input();
            let first = self.first_text();
            self.emit_expression(first.clone());
            self.emit_result(first);
            return Ok(());
        }

        let expression = compose(&[
            &self.first_text(),
            &self.state.operator.to_string(),
            percent.text(),
        ]);
        self.emit_expression(expression);
        self.emit_result(percent.text());
        Ok(())
    }

    // ========================================================================
    // Advanced (Unary) Math
    // ========================================================================

    /// Apply a unary operation to `operand` and show it as
    /// `"<op>(<operand>)"`.
    ///
    /// Advanced-math results do not chain as a pending binary operation: with
    /// no operator selected (or right after a finalized result) the label
    /// replaces the whole expression; otherwise it is shown in place of the
    /// second operand under the current operator.
    ///
    /// # Errors
    /// `DivisionByZero` for the reciprocal of zero, `InvalidDomain` for the
    /// square root of a negative operand. Both clear the engine.
    pub fn advanced_math(&mut self, operand: Decimal, op: UnaryOp) -> CalcResult<()> {
        if op == UnaryOp::Reciprocal && operand.is_zero() {
            return self.fail(CalcError::DivisionByZero);
        }
        if op == UnaryOp::SquareRoot && operand < Decimal::ZERO {
            return self.fail(CalcError::InvalidDomain);
        }

        let raw = match op.apply(operand) {
            Ok(raw) => raw,
            Err(err) => return self.fail(err),
        };
        let result = Value::plain(round_result(raw, self.config.precision()));
        let label = format!("{}({})", op.symbol(), Value::plain(operand));

        if self.state.operator.is_idle() || self.state.phase.is_result_shown() {
            self.emit_expression(label);
            self.state.operator = ActiveOperator::Idle;
        } else {
            let expression = compose(&[
                &self.first_text(),
                &self.state.operator.to_string(),
                &label,
            ]);
            self.emit_expression(expression);
        }

        if self.state.second.is_none() {
            self.state.phase = EntryPhase::ResultShown;
        } else if !self.state.phase.is_result_shown() {
            self.state.phase = EntryPhase::OperatorPending;
        }

        self.state.buffer = InputBuffer::resolved(result.clone());
        self.emit_result(result.text());
        Ok(())
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    /// The single gate through which the typed buffer enters the arithmetic
    /// pipeline. The value lands in the first operand when none is set yet,
    /// when a result is showing, or when the engine is parked on the equals
    /// sentinel; otherwise it becomes (or overwrites) the second operand.
    fn commit_input(&mut self) {
        let value = self.state.buffer.resolve();
        if self.state.first.is_none()
            || self.state.phase.is_result_shown()
            || self.state.operator.is_equals()
        {
            self.state.first = Some(value);
            if !self.state.phase.is_result_shown() {
                self.state.phase = EntryPhase::OperatorPending;
            }
        } else {
            self.state.second = Some(value);
        }
    }

    /// The pending combination that must never reach the divider.
    fn is_division_by_zero(&self) -> bool {
        self.state.operator.binary() == Some(BinaryOp::Divide)
            && self.state.second.as_ref().is_some_and(Value::is_zero)
    }

    /// Resolve the outstanding operation into a display-formatted value.
    /// With nothing applicable pending, the latest committed operand passes
    /// through unchanged.
    fn resolve_pending(&self) -> CalcResult<Value> {
        let first = self.state.first.clone().unwrap_or_else(Value::zero);
        match self.state.operator {
            ActiveOperator::Binary(op) => match &self.state.second {
                Some(second) => {
                    let raw = op.apply(first.decimal(), second.decimal())?;
                    Ok(format_result(
                        raw,
                        self.config.precision(),
                        self.config.scientific_threshold(),
                    ))
                },
                None => Ok(first),
            },
            _ => Ok(self.state.second.clone().unwrap_or(first)),
        }
    }

    /// Park on the equals sentinel showing `"<first> ="` without computing.
    fn finalize_first(&mut self) {
        self.state.operator = ActiveOperator::Equals;
        let expression = compose(&[&self.first_text(), "="]);
        self.emit_expression(expression);
    }

    /// Run the failure path: clear the engine, then surface the error.
    fn fail(&mut self, err: CalcError) -> CalcResult<()> {
        self.clear_all();
        Err(err)
    }

    fn first_text(&self) -> String {
        self.state
            .first
            .as_ref()
            .map(|v| v.text().to_string())
            .unwrap_or_else(|| "0".to_string())
    }

    fn emit_expression(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.expression = text.clone();
        self.sink.on_event(DisplayEvent::ExpressionUpdated {
            text,
            timestamp: Utc::now(),
        });
    }

    fn emit_result(&self, text: impl Into<String>) {
        self.sink.on_event(DisplayEvent::ResultUpdated {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }
}

/// Join the non-empty expression parts with single spaces.
fn compose(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
