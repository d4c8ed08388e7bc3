/// `#define` macro table
///
/// Object-like macros are collected from the (comment-free) source and
/// resolved to literals with a bounded worklist: each pass tries every
/// pending macro against the values resolved so far, a macro that still
/// names an unresolved macro is pushed back for the next pass. Resolution
/// stops with `MacroResolutionError` when a pass makes no progress or the
/// pass limit is reached, so cycles and references to undefined names
/// cannot hang extraction.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parse::expr::{self, EvalError, Literal};

const SOURCE: &str = "shader_meta::defines";

/// One `#define NAME VALUE` line
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub name: String,
    /// Raw value expression
    pub value: String,
    /// 1-based source line
    pub line: usize,
}

fn define_regex() -> &'static Regex {
    static DEFINE: OnceLock<Regex> = OnceLock::new();
    DEFINE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]+([^\r\n]*?)[ \t]*\r?$")
            .expect("define regex is valid")
    })
}

fn identifier_regex() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| {
        Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("identifier regex is valid")
    })
}

/// Resolved macros, in resolution order
#[derive(Debug, Clone, Default)]
pub struct DefineTable {
    values: FxHashMap<String, Literal>,
    order: Vec<String>,
}

impl DefineTable {
    /// Collect `#define NAME VALUE` lines
    ///
    /// Function-like macros (`#define F(x) ...`) and value-less flags
    /// (`#define USE_FOG`) are not collected.
    pub fn extract(source: &str) -> Vec<Define> {
        define_regex()
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let value = caps.get(2)?.as_str().trim();
                if value.is_empty() {
                    return None;
                }
                Some(Define {
                    name: caps[1].to_string(),
                    value: value.to_string(),
                    line: source[..whole.start()].matches('\n').count() + 1,
                })
            })
            .collect()
    }

    /// Resolve defines to literals
    ///
    /// A later definition of the same name replaces an earlier one.
    /// `max_passes` bounds the number of worklist passes.
    pub fn resolve(defines: Vec<Define>, max_passes: usize) -> Result<DefineTable> {
        let mut latest: FxHashMap<String, usize> = FxHashMap::default();
        let mut unique: Vec<Define> = Vec::new();
        for define in defines {
            match latest.get(&define.name) {
                Some(&index) => unique[index] = define,
                None => {
                    latest.insert(define.name.clone(), unique.len());
                    unique.push(define);
                }
            }
        }

        let mut table = DefineTable::default();
        let mut pending: VecDeque<Define> = unique.into();
        let mut passes = 0;

        while !pending.is_empty() {
            if passes >= max_passes {
                let name = pending.front().map(|d| d.name.clone()).unwrap_or_default();
                return Err(Error::MacroResolutionError {
                    name,
                    reason: format!("not resolved after {} passes", max_passes),
                }
                .logged(SOURCE));
            }
            passes += 1;

            let mut progressed = false;
            for _ in 0..pending.len() {
                let Some(define) = pending.pop_front() else {
                    break;
                };
                match expr::evaluate(&define.value, &table.values) {
                    Ok(literal) => {
                        crate::shader_trace!(SOURCE, "{} = {}", define.name, literal);
                        table.order.push(define.name.clone());
                        table.values.insert(define.name, literal);
                        progressed = true;
                    }
                    Err(EvalError::Unresolved(missing)) => {
                        crate::shader_debug!(SOURCE,
                            "'{}' waits for '{}' (pass {})", define.name, missing, passes);
                        pending.push_back(define);
                    }
                    Err(EvalError::Syntax(msg)) => {
                        return Err(Error::MacroResolutionError {
                            name: define.name,
                            reason: format!("cannot evaluate '{}': {}", define.value, msg),
                        }
                        .logged(SOURCE));
                    }
                }
            }

            if !progressed {
                return Err(Self::stalled(&pending, &table).logged(SOURCE));
            }
        }

        crate::shader_debug!(SOURCE, "Resolved {} macros in {} passes", table.len(), passes);
        Ok(table)
    }

    /// Extract and resolve in one step
    pub fn from_source(source: &str, max_passes: usize) -> Result<DefineTable> {
        Self::resolve(Self::extract(source), max_passes)
    }

    /// Diagnose a pass that resolved nothing
    fn stalled(pending: &VecDeque<Define>, table: &DefineTable) -> Error {
        let pending_names: Vec<&str> = pending.iter().map(|d| d.name.as_str()).collect();

        for define in pending {
            let Err(EvalError::Unresolved(missing)) = expr::evaluate(&define.value, &table.values) else {
                continue;
            };
            if !pending_names.contains(&missing.as_str()) {
                return Error::MacroResolutionError {
                    name: define.name.clone(),
                    reason: format!("references undefined name '{}'", missing),
                };
            }
        }

        let name = pending.front().map(|d| d.name.clone()).unwrap_or_default();
        Error::MacroResolutionError {
            name,
            reason: format!("circular definition between {}", pending_names.join(", ")),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Macro names in resolution order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|name| name.as_str())
    }

    /// Evaluate an expression (array size...) against the resolved macros
    pub fn evaluate(&self, input: &str) -> std::result::Result<Literal, EvalError> {
        expr::evaluate(input, &self.values)
    }

    /// Replace every whole-token occurrence of a resolved macro name
    ///
    /// Preprocessor lines are left untouched. Line structure is preserved.
    pub fn substitute(&self, source: &str) -> String {
        if self.is_empty() {
            return source.to_string();
        }

        source
            .split('\n')
            .map(|line| {
                if line.trim_start().starts_with('#') {
                    return line.to_string();
                }
                identifier_regex()
                    .replace_all(line, |caps: &Captures| match self.values.get(&caps[0]) {
                        Some(literal) => literal.to_string(),
                        None => caps[0].to_string(),
                    })
                    .into_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[path = "defines_tests.rs"]
mod tests;
