// ============================================================================
// Calculator Engine Library
// Event-driven arithmetic engine backing a calculator-style interface
// ============================================================================

//! # Calculator Engine
//!
//! An arithmetic evaluation engine driven by discrete user input events.
//!
//! ## Features
//!
//! - **Explicit entry-phase state machine** instead of ad-hoc boolean flags
//! - **Decimal arithmetic** with display-faithful rounding and scientific
//!   notation past the 10-digit range
//! - **Typed failure values** for division by zero, overflow, and negative
//!   roots, carrying the user-facing alert text
//! - **Pluggable display sinks** for the expression and result lines
//!
//! ## Example
//!
//! ```rust
//! use calculator_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(CollectingDisplaySink::new());
//! let mut calc = Calculator::new(sink.clone());
//!
//! // 12 + 3 =
//! calc.append_digit(InputToken::Digit(1));
//! calc.append_digit(InputToken::Digit(2));
//! calc.operator_pressed(BinaryOp::Add).unwrap();
//! calc.append_digit(InputToken::Digit(3));
//! calc.equals().unwrap();
//!
//! assert_eq!(sink.last_expression().as_deref(), Some("12 + 3 ="));
//! assert_eq!(sink.last_result().as_deref(), Some("15"));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ActiveOperator, BinaryOp, CalculatorSnapshot, DisplayConfig, EntryPhase, InputBuffer,
        InputToken, UnaryOp,
    };
    pub use crate::engine::{Calculator, CalculatorBuilder};
    pub use crate::interfaces::{
        CollectingDisplaySink, DisplayEvent, DisplaySink, LoggingDisplaySink, NoOpDisplaySink,
    };
    pub use crate::numeric::{CalcError, CalcResult, Value};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn calculator() -> (Calculator, Arc<CollectingDisplaySink>) {
        let sink = Arc::new(CollectingDisplaySink::new());
        (Calculator::new(sink.clone()), sink)
    }

    fn press(calc: &mut Calculator, keys: &str) {
        for c in keys.chars() {
            match c {
                '0'..='9' | '.' => calc.append_digit(InputToken::from_char(c).unwrap()),
                '+' => drop(calc.operator_pressed(BinaryOp::Add)),
                '-' => drop(calc.operator_pressed(BinaryOp::Subtract)),
                '×' => drop(calc.operator_pressed(BinaryOp::Multiply)),
                '÷' => drop(calc.operator_pressed(BinaryOp::Divide)),
                '=' => drop(calc.equals()),
                '%' => drop(calc.percent()),
                ' ' => {},
                _ => panic!("unsupported key {c}"),
            }
        }
    }

    #[test]
    fn test_chained_operators_end_to_end() {
        let (mut calc, sink) = calculator();
        press(&mut calc, "3+4+5=");
        assert_eq!(sink.last_result().as_deref(), Some("12"));
        assert_eq!(calc.snapshot().result, "12");
    }

    #[test]
    fn test_identity_elements_round_trip() {
        for (keys, expected) in [("7+0=", "7"), ("7-0=", "7"), ("7×1=", "7"), ("7÷1=", "7")] {
            let (mut calc, _) = calculator();
            press(&mut calc, keys);
            assert_eq!(calc.snapshot().result, expected, "sequence {keys}");
        }
    }

    #[test]
    fn test_equals_twice_leaves_state_unchanged() {
        let (mut calc, _) = calculator();
        press(&mut calc, "12×3=");
        let before = calc.snapshot();
        assert!(calc.equals().is_ok());
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_division_by_zero_clears_and_reports() {
        let (mut calc, sink) = calculator();
        press(&mut calc, "8÷0");
        assert_eq!(calc.equals(), Err(CalcError::DivisionByZero));

        let snapshot = calc.snapshot();
        assert_eq!(snapshot.result, "0");
        assert!(snapshot.first.is_none());
        assert!(snapshot.second.is_none());
        assert!(snapshot.operator.is_idle());
        assert_eq!(sink.last_expression().as_deref(), Some(""));
        assert_eq!(
            CalcError::DivisionByZero.to_string(),
            "Error: Cannot divide by zero"
        );
    }

    #[test]
    fn test_scientific_notation_boundary() {
        let (mut calc, sink) = calculator();
        press(&mut calc, "5000000000×3=");
        assert_eq!(sink.last_result().as_deref(), Some("1.5e+10"));
    }

    #[test]
    fn test_negative_root_raises_invalid_domain() {
        let (mut calc, _) = calculator();
        let result = calc.advanced_math(Decimal::from(-4), UnaryOp::SquareRoot);
        assert_eq!(result, Err(CalcError::InvalidDomain));
        assert!(calc.snapshot().first.is_none());

        calc.advanced_math(Decimal::from(9), UnaryOp::SquareRoot)
            .unwrap();
        assert_eq!(calc.snapshot().result, "3");
    }

    #[test]
    fn test_percent_with_pending_addition() {
        let (mut calc, sink) = calculator();
        press(&mut calc, "200+10%");
        assert_eq!(calc.snapshot().second.unwrap().text(), "20");
        assert_eq!(sink.last_expression().as_deref(), Some("200 + 20"));
    }

    #[test]
    fn test_reciprocal_of_zero_signals_without_crashing() {
        let (mut calc, _) = calculator();
        let result = calc.advanced_math(Decimal::ZERO, UnaryOp::Reciprocal);
        assert_eq!(result, Err(CalcError::DivisionByZero));
        assert_eq!(calc.snapshot().result, "0");
    }

    #[test]
    fn test_result_feeds_next_calculation() {
        let (mut calc, _) = calculator();
        press(&mut calc, "6×7=");
        assert_eq!(calc.snapshot().result, "42");
        press(&mut calc, "-2=");
        assert_eq!(calc.snapshot().result, "40");
    }
}
