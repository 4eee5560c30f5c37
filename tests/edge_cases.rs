//! Edge case tests and robustness validation
//!
//! Extreme operands, non-finite values and boundary inputs must never panic
//! and must leave the stack in a well-defined state.

use rpncalc::command::{BinaryOp, CalcCommand, UnaryOp};
use rpncalc::command::dispatcher::parse_number;
use rpncalc::{
    CalcError, ChangeEvent, CommandDispatcher, CommandManager, CommandRepository, OperandStack,
    UndoableCommand,
};
use std::f64::consts::{FRAC_PI_2, PI};

fn stack_of(values: &[f64]) -> OperandStack {
    let mut stack = OperandStack::new();
    for &v in values {
        stack.push(v, ChangeEvent::Suppress);
    }
    stack
}

fn dispatcher() -> CommandDispatcher {
    CommandDispatcher::new(CommandRepository::with_core_commands(), CommandManager::new())
}

/// Overflowing arithmetic produces infinity rather than an error
#[test]
fn test_overflow_to_infinity() {
    let mut stack = stack_of(&[f64::MAX, f64::MAX]);
    let mut multiply = CalcCommand::binary(BinaryOp::Multiply);
    multiply.execute(&mut stack).unwrap();
    assert_eq!(stack.top().unwrap(), f64::INFINITY);

    multiply.undo(&mut stack).unwrap();
    assert_eq!(stack.elements(2), vec![f64::MAX, f64::MAX]);
}

/// Inverse trigonometry outside [-1, 1] yields NaN
#[test]
fn test_inverse_trig_out_of_domain() {
    for op in [UnaryOp::ArcSine, UnaryOp::ArcCosine] {
        let mut stack = stack_of(&[2.0]);
        let mut command = CalcCommand::unary(op);
        command.execute(&mut stack).unwrap();
        assert!(stack.top().unwrap().is_nan());

        command.undo(&mut stack).unwrap();
        assert_eq!(stack.top().unwrap(), 2.0);
    }
}

/// arccos is the real inverse cosine
#[test]
fn test_arccos_values() {
    let mut stack = stack_of(&[-1.0]);
    CalcCommand::unary(UnaryOp::ArcCosine)
        .execute(&mut stack)
        .unwrap();
    assert!((stack.top().unwrap() - PI).abs() < 1e-15);

    let mut stack = stack_of(&[1.0]);
    CalcCommand::unary(UnaryOp::ArcCosine)
        .execute(&mut stack)
        .unwrap();
    assert_eq!(stack.top().unwrap(), 0.0);
}

/// NaN propagates through arithmetic without errors
#[test]
fn test_nan_propagates() {
    let mut d = dispatcher();
    let mut stack = OperandStack::new();
    for token in ["5", "arcsin", "3", "+", "2", "*"] {
        d.dispatch(token, &mut stack).unwrap();
    }
    assert_eq!(stack.size(), 1);
    assert!(stack.top().unwrap().is_nan());
}

/// Tangent at odd multiples of pi/2 is rejected before the stack changes
#[test]
fn test_tangent_poles() {
    for x in [FRAC_PI_2, -FRAC_PI_2, 3.0 * FRAC_PI_2] {
        let mut stack = stack_of(&[x]);
        let result = CalcCommand::unary(UnaryOp::Tangent).execute(&mut stack);
        assert_eq!(result, Err(CalcError::InfiniteResult), "tan({x})");
        assert_eq!(stack.elements(1), vec![x]);
    }

    // Close to a pole but not on it
    let mut stack = stack_of(&[FRAC_PI_2 - 1e-6]);
    CalcCommand::unary(UnaryOp::Tangent)
        .execute(&mut stack)
        .unwrap();
    assert!(stack.top().unwrap() > 1e5);
}

/// Division by zero, including negative zero, is rejected
#[test]
fn test_divide_by_signed_zero() {
    for zero in [0.0, -0.0] {
        let mut stack = stack_of(&[1.0, zero]);
        let result = CalcCommand::binary(BinaryOp::Divide).execute(&mut stack);
        assert_eq!(result, Err(CalcError::DivideByZero));
        assert_eq!(stack.size(), 2);
    }

    // Zero on the next element is fine
    let mut stack = stack_of(&[0.0, 4.0]);
    CalcCommand::binary(BinaryOp::Divide)
        .execute(&mut stack)
        .unwrap();
    assert_eq!(stack.top().unwrap(), 0.0);
}

/// Subnormal and extreme literals survive entry and undo
#[test]
fn test_extreme_literals() {
    let mut d = dispatcher();
    let mut stack = OperandStack::new();
    for token in ["5e-324", "1.7976931348623157e308", "-0"] {
        d.dispatch(token, &mut stack).unwrap();
    }
    let top = stack.top().unwrap();
    assert_eq!(top, 0.0);
    assert!(top.is_sign_negative());
    assert_eq!(stack.elements(3)[2], 5e-324);

    for _ in 0..3 {
        d.dispatch("undo", &mut stack).unwrap();
    }
    assert!(stack.is_empty());
}

/// Literals that overflow or name non-finite values are not numbers
#[test]
fn test_non_finite_literals_rejected() {
    for token in ["inf", "-inf", "NaN", "infinity", "1e400"] {
        assert_eq!(parse_number(token), None, "{token}");
    }

    let mut d = dispatcher();
    let mut stack = OperandStack::new();
    assert_eq!(
        d.dispatch("nan", &mut stack),
        Err(CalcError::UnrecognizedLabel("nan".to_string()))
    );
    assert!(stack.is_empty());
}

/// Undo beyond the history limit reports an error instead of panicking
#[test]
fn test_history_limit() {
    let mut d = CommandDispatcher::new(
        CommandRepository::with_core_commands(),
        CommandManager::with_capacity(3),
    );
    let mut stack = OperandStack::new();
    for i in 0..5 {
        d.dispatch(&i.to_string(), &mut stack).unwrap();
    }
    for _ in 0..3 {
        d.dispatch("undo", &mut stack).unwrap();
    }
    assert_eq!(d.dispatch("undo", &mut stack), Err(CalcError::NothingToUndo));
    assert_eq!(stack.elements(usize::MAX), vec![1.0, 0.0]);
}

/// Long sessions stay consistent
#[test]
fn test_deep_stack() {
    let mut d = dispatcher();
    let mut stack = OperandStack::new();
    for i in 0..10_000 {
        d.dispatch(&i.to_string(), &mut stack).unwrap();
    }
    assert_eq!(stack.size(), 10_000);

    d.dispatch("clear", &mut stack).unwrap();
    assert!(stack.is_empty());
    d.dispatch("undo", &mut stack).unwrap();
    assert_eq!(stack.size(), 10_000);
    assert_eq!(stack.top().unwrap(), 9999.0);
}
