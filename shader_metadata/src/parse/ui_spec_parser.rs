/// Trailing-comment UI spec parsing
///
/// The payload after `//` is a JSON5 object literal: keys may be bare
/// identifiers or quoted with `"` or `'`, strings may use either quote and
/// trailing commas are allowed. There is no expression evaluation.

use std::fmt;

use serde_json::Value;

use crate::metadata::UiSpec;

/// Maximum nesting of arrays/objects in one payload
const MAX_DEPTH: usize = 64;

/// Why a trailing comment is not a valid UI spec
#[derive(Debug, Clone, PartialEq)]
pub enum UiSpecError {
    /// The payload parsed, but to something other than an object
    NotAnObject(String),
    /// The payload is not a literal
    Syntax(String),
}

impl fmt::Display for UiSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiSpecError::NotAnObject(kind) => write!(f, "UI spec must be an object, found {}", kind),
            UiSpecError::Syntax(msg) => f.write_str(msg),
        }
    }
}

/// Parses the trailing comment of a declaration
pub struct UiSpecParser;

impl UiSpecParser {
    /// Parse `trailing` (the text after a declaration's `;`)
    ///
    /// Returns `Ok(None)` when there is no `//` comment or the comment is
    /// empty.
    pub fn parse(trailing: &str) -> Result<Option<UiSpec>, UiSpecError> {
        let Some(payload) = trailing.trim().strip_prefix("//") else {
            return Ok(None);
        };
        let payload = payload.trim();
        if payload.is_empty() {
            return Ok(None);
        }

        if nesting_depth(payload) > MAX_DEPTH {
            return Err(UiSpecError::Syntax(format!("nesting deeper than {} levels", MAX_DEPTH)));
        }

        let value: Value = json5::from_str(payload).map_err(|e| UiSpecError::Syntax(e.to_string()))?;

        match value {
            Value::Object(spec) => Ok(Some(spec)),
            Value::Array(_) => Err(UiSpecError::NotAnObject("an array".to_string())),
            Value::String(_) => Err(UiSpecError::NotAnObject("a string".to_string())),
            Value::Number(_) => Err(UiSpecError::NotAnObject("a number".to_string())),
            Value::Bool(_) => Err(UiSpecError::NotAnObject("a boolean".to_string())),
            Value::Null => Err(UiSpecError::NotAnObject("null".to_string())),
        }
    }
}

/// Deepest `{` / `[` nesting outside string literals
fn nesting_depth(payload: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in payload.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            '}' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

#[cfg(test)]
#[path = "ui_spec_parser_tests.rs"]
mod tests;
