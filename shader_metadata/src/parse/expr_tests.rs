//! Unit tests for expr.rs
//!
//! Tests literal parsing, operators, name lookup and rejection of
//! anything outside the expression grammar.

use crate::parse::expr::{evaluate, EvalError, Literal};
use rustc_hash::FxHashMap;

fn eval(input: &str) -> Result<Literal, EvalError> {
    evaluate(input, &FxHashMap::default())
}

// ============================================================================
// LITERALS
// ============================================================================

#[test]
fn test_integer_literals() {
    assert_eq!(eval("42"), Ok(Literal::Int(42)));
    assert_eq!(eval("0x1F"), Ok(Literal::Int(31)));
    assert_eq!(eval("8u"), Ok(Literal::Int(8)));
}

#[test]
fn test_float_literals() {
    assert_eq!(eval("2.5"), Ok(Literal::Float(2.5)));
    assert_eq!(eval(".5"), Ok(Literal::Float(0.5)));
    assert_eq!(eval("1e3"), Ok(Literal::Float(1000.0)));
    assert_eq!(eval("3f"), Ok(Literal::Float(3.0)));
}

#[test]
fn test_string_literal() {
    assert_eq!(eval("\"abc\""), Ok(Literal::Str("abc".to_string())));
}

// ============================================================================
// OPERATORS
// ============================================================================

#[test]
fn test_precedence_and_parentheses() {
    assert_eq!(eval("2 + 3 * 4"), Ok(Literal::Int(14)));
    assert_eq!(eval("(2 + 3) * 4"), Ok(Literal::Int(20)));
    assert_eq!(eval("-(4 - 6)"), Ok(Literal::Int(2)));
}

#[test]
fn test_integer_division_truncates() {
    assert_eq!(eval("7 / 2"), Ok(Literal::Int(3)));
    assert_eq!(eval("7 % 4"), Ok(Literal::Int(3)));
}

#[test]
fn test_mixed_arithmetic_is_float() {
    assert_eq!(eval("1 + 0.5"), Ok(Literal::Float(1.5)));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("\"v\" + 2"), Ok(Literal::Str("v2".to_string())));
}

#[test]
fn test_division_by_zero_is_an_error() {
    assert!(matches!(eval("1 / 0"), Err(EvalError::Syntax(_))));
}

// ============================================================================
// NAMES
// ============================================================================

#[test]
fn test_resolved_names() {
    let mut names = FxHashMap::default();
    names.insert("A".to_string(), Literal::Int(2));
    assert_eq!(evaluate("A + 1", &names), Ok(Literal::Int(3)));
}

#[test]
fn test_unresolved_name() {
    assert_eq!(eval("D * 2"), Err(EvalError::Unresolved("D".to_string())));
}

#[test]
fn test_function_call_is_not_evaluated() {
    // `vec3` is just an unknown name, the call is never executed
    assert_eq!(eval("vec3(1.0)"), Err(EvalError::Unresolved("vec3".to_string())));
}

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

#[test]
fn test_syntax_errors() {
    assert!(matches!(eval(""), Err(EvalError::Syntax(_))));
    assert!(matches!(eval("1 +"), Err(EvalError::Syntax(_))));
    assert!(matches!(eval("(1"), Err(EvalError::Syntax(_))));
    assert!(matches!(eval("1 2"), Err(EvalError::Syntax(_))));
    assert!(matches!(eval("a > b"), Err(_)));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(eval(&deep), Err(EvalError::Syntax("nesting too deep".to_string())));

    let negations = format!("{}1", "-".repeat(5000));
    assert!(matches!(eval(&negations), Err(EvalError::Syntax(_))));
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let nested = format!("{}7{}", "(".repeat(32), ")".repeat(32));
    assert_eq!(eval(&nested), Ok(Literal::Int(7)));
    assert_eq!(eval("--3"), Ok(Literal::Int(3)));
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_literal_display() {
    assert_eq!(Literal::Int(3).to_string(), "3");
    assert_eq!(Literal::Float(2.0).to_string(), "2.0");
    assert_eq!(Literal::Float(0.25).to_string(), "0.25");
    assert_eq!(Literal::Str("x".to_string()).to_string(), "x");
}

#[test]
fn test_as_count() {
    assert_eq!(Literal::Int(4).as_count(), Some(4));
    assert_eq!(Literal::Int(-1).as_count(), None);
    assert_eq!(Literal::Float(4.0).as_count(), None);
}
