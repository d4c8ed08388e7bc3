//! Unit tests for ui_spec_parser.rs
//!
//! Tests the JSON5 object literal grammar and the object-only rule.

use crate::parse::{UiSpecError, UiSpecParser};
use serde_json::json;

// ============================================================================
// NO SPEC
// ============================================================================

#[test]
fn test_no_comment_is_none() {
    assert_eq!(UiSpecParser::parse(""), Ok(None));
    assert_eq!(UiSpecParser::parse("   "), Ok(None));
    assert_eq!(UiSpecParser::parse("uniform float uB;"), Ok(None));
    assert_eq!(UiSpecParser::parse("/* block */"), Ok(None));
}

#[test]
fn test_empty_comment_is_none() {
    assert_eq!(UiSpecParser::parse("//"), Ok(None));
    assert_eq!(UiSpecParser::parse("//   "), Ok(None));
}

// ============================================================================
// OBJECTS
// ============================================================================

#[test]
fn test_json_object() {
    let spec = UiSpecParser::parse(r#"// {"min":0,"max":1}"#).unwrap().unwrap();
    assert_eq!(spec.len(), 2);
    assert_eq!(spec["min"].as_f64(), Some(0.0));
    assert_eq!(spec["max"].as_f64(), Some(1.0));
}

#[test]
fn test_relaxed_object() {
    let spec = UiSpecParser::parse("//{ ui: 'slider', step: .05, label: \"Alpha\", visible: true, }")
        .unwrap()
        .unwrap();
    assert_eq!(spec["ui"].as_str(), Some("slider"));
    assert_eq!(spec["step"].as_f64(), Some(0.05));
    assert_eq!(spec["label"].as_str(), Some("Alpha"));
    assert_eq!(spec["visible"].as_bool(), Some(true));
}

#[test]
fn test_nested_values() {
    let spec = UiSpecParser::parse("// {range: {min: -1, max: 1e2}, options: [1, 'two', null]}")
        .unwrap()
        .unwrap();
    let range = spec["range"].as_object().expect("range object");
    assert_eq!(range["min"].as_f64(), Some(-1.0));
    assert_eq!(range["max"].as_f64(), Some(100.0));
    let options = spec["options"].as_array().expect("options array");
    assert_eq!(options.len(), 3);
    assert_eq!(options[0].as_f64(), Some(1.0));
    assert_eq!(options[1], json!("two"));
    assert!(options[2].is_null());
}

#[test]
fn test_string_escapes() {
    let spec = UiSpecParser::parse(r#"// {label: "a\"b\n", icon: "A"}"#).unwrap().unwrap();
    assert_eq!(spec["label"].as_str(), Some("a\"b\n"));
    assert_eq!(spec["icon"].as_str(), Some("A"));
}

#[test]
fn test_empty_object() {
    let spec = UiSpecParser::parse("// {}").unwrap().unwrap();
    assert!(spec.is_empty());
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_scalar_payload_is_not_an_object() {
    assert!(matches!(UiSpecParser::parse("// 42"), Err(UiSpecError::NotAnObject(_))));
    assert!(matches!(UiSpecParser::parse("// 'text'"), Err(UiSpecError::NotAnObject(_))));
    assert!(matches!(UiSpecParser::parse("// [1, 2]"), Err(UiSpecError::NotAnObject(_))));
}

#[test]
fn test_plain_text_comment_is_an_error() {
    assert!(UiSpecParser::parse("// not-an-object").is_err());
}

#[test]
fn test_error_message_mentions_object() {
    let err = UiSpecParser::parse("// true").unwrap_err();
    assert_eq!(err.to_string(), "UI spec must be an object, found a boolean");
}

#[test]
fn test_syntax_errors() {
    assert!(matches!(UiSpecParser::parse("// {min: }"), Err(UiSpecError::Syntax(_))));
    assert!(matches!(UiSpecParser::parse("// {min 0}"), Err(UiSpecError::Syntax(_))));
    assert!(matches!(UiSpecParser::parse("// {min: 0"), Err(UiSpecError::Syntax(_))));
    assert!(matches!(UiSpecParser::parse("// {a: 'x} "), Err(UiSpecError::Syntax(_))));
    assert!(matches!(UiSpecParser::parse("// {a: 1} extra"), Err(UiSpecError::Syntax(_))));
    assert!(matches!(UiSpecParser::parse("// {a: alert(1)}"), Err(UiSpecError::Syntax(_))));
}

#[test]
fn test_nesting_limit() {
    let deep = format!("// {}{}", "[".repeat(100), "]".repeat(100));
    assert!(matches!(UiSpecParser::parse(&deep), Err(UiSpecError::Syntax(_))));
}

#[test]
fn test_nesting_inside_strings_does_not_count() {
    let payload = format!("// {{label: '{}'}}", "[".repeat(100));
    let spec = UiSpecParser::parse(&payload).unwrap().unwrap();
    assert_eq!(spec["label"].as_str().map(str::len), Some(100));
}
