// ============================================================================
// Basic Usage Example
// ============================================================================

use calculator_engine::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    println!("=== Calculator Engine Example ===\n");

    let sink = Arc::new(CollectingDisplaySink::new());
    let mut calc = Calculator::new(sink.clone());

    // 12 + 3 =
    println!("Entering 12 + 3 = ...");
    calc.append_digit(InputToken::Digit(1));
    calc.append_digit(InputToken::Digit(2));
    calc.operator_pressed(BinaryOp::Add).unwrap();
    calc.append_digit(InputToken::Digit(3));
    calc.equals().unwrap();
    print_displays(&sink);

    // Chain straight off the result: × 4 =
    println!("Chaining × 4 = ...");
    calc.operator_pressed(BinaryOp::Multiply).unwrap();
    calc.append_digit(InputToken::Digit(4));
    calc.equals().unwrap();
    print_displays(&sink);

    // Square root of the current value
    println!("Taking the square root...");
    calc.advanced_math(calc.current_value(), UnaryOp::SquareRoot)
        .unwrap();
    print_displays(&sink);

    // Percent: 200 + 10 %
    println!("Entering 200 + 10 % ...");
    calc.clear_all();
    calc.append_digit(InputToken::Digit(2));
    calc.append_digit(InputToken::Digit(0));
    calc.append_digit(InputToken::Digit(0));
    calc.operator_pressed(BinaryOp::Add).unwrap();
    calc.append_digit(InputToken::Digit(1));
    calc.append_digit(InputToken::Digit(0));
    calc.percent().unwrap();
    calc.equals().unwrap();
    print_displays(&sink);

    // A failure clears the engine and returns the alert text
    println!("Dividing by zero...");
    calc.append_digit(InputToken::Digit(8));
    calc.operator_pressed(BinaryOp::Divide).unwrap();
    calc.append_digit(InputToken::Digit(0));
    match calc.equals() {
        Ok(()) => unreachable!("division by zero must fail"),
        Err(err) => println!("  alert: {}\n", err),
    }

    // The same sentinel comes back from the reciprocal of zero
    match calc.advanced_math(Decimal::ZERO, UnaryOp::Reciprocal) {
        Ok(()) => unreachable!("reciprocal of zero must fail"),
        Err(err) => println!("Reciprocal of zero alert: {}", err),
    }

    println!("\nFinal snapshot: {:?}", calc.snapshot());
}

fn print_displays(sink: &CollectingDisplaySink) {
    println!(
        "  expression: {:?}",
        sink.last_expression().unwrap_or_default()
    );
    println!("  result:     {:?}\n", sink.last_result().unwrap_or_default());
    sink.take_events();
}
