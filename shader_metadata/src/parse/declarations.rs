/// Uniform / attribute declaration scanning
///
/// Recognized form:
///
/// ```glsl
/// uniform [lowp|mediump|highp] <type> <name> [ '[' <size> ']' ] {, <name> [ '[' <size> ']' ]} ; <rest of line>
/// ```
///
/// Each name of a declarator list becomes its own declaration and they all
/// share the trailing comment.
///
/// The scanner runs on comment-free text (see `CommentStripper`), which
/// keeps line numbers intact, so the trailing comment of a declaration is
/// recovered from the same line of the original source.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashSet;

/// Declaration storage qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKeyword {
    Uniform,
    Attribute,
}

impl DeclarationKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKeyword::Uniform => "uniform",
            DeclarationKeyword::Attribute => "attribute",
        }
    }
}

/// A declaration as written in the source
#[derive(Debug, Clone, PartialEq)]
pub struct RawDeclaration {
    pub keyword: DeclarationKeyword,
    /// Precision qualifier, recorded but otherwise ignored
    pub precision: Option<String>,
    /// Type token (`vec3`, or a struct type name)
    pub type_token: String,
    pub name: String,
    /// Raw array size expression (`4`, `MAX_LIGHTS`)
    pub array_size: Option<String>,
    /// Text after the terminating `;` on the same line of the original source
    pub trailing: String,
    /// 1-based line of the terminating `;`
    pub line: usize,
}

fn declaration_regex(keyword: DeclarationKeyword) -> &'static Regex {
    static UNIFORM: OnceLock<Regex> = OnceLock::new();
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();

    let cell = match keyword {
        DeclarationKeyword::Uniform => &UNIFORM,
        DeclarationKeyword::Attribute => &ATTRIBUTE,
    };
    cell.get_or_init(|| {
        let declarator = r"[A-Za-z_][A-Za-z0-9_]*\s*(?:\[[^\]\n]*\])?";
        let pattern = format!(
            r"\b{}\s+(?:(lowp|mediump|highp)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s+({d}(?:\s*,\s*{d})*)\s*;",
            keyword.as_str(),
            d = declarator
        );
        Regex::new(&pattern).expect("declaration regex is valid")
    })
}

fn declarator_regex() -> &'static Regex {
    static DECLARATOR: OnceLock<Regex> = OnceLock::new();
    DECLARATOR.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:\[([^\]]*)\])?$")
            .expect("declarator regex is valid")
    })
}

/// Finds `uniform` / `attribute` declarations
pub struct DeclarationScanner;

impl DeclarationScanner {
    /// Scan comment-free `source` for declarations introduced by `keyword`
    ///
    /// `original` is the source before comment stripping, used to recover
    /// trailing comments by line. When `ground_truth` is given, only
    /// declarations whose name it contains are returned.
    pub fn scan(
        source: &str,
        original: &str,
        keyword: DeclarationKeyword,
        ground_truth: Option<&FxHashSet<String>>,
    ) -> Vec<RawDeclaration> {
        let original_lines: Vec<&str> = original.split('\n').collect();

        let mut declarations = Vec::new();

        for caps in declaration_regex(keyword).captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let line_index = source[..whole.end()].matches('\n').count();
            let precision = caps.get(1).map(|m| m.as_str().to_string());

            for declarator in caps[3].split(',') {
                let Some(parts) = declarator_regex().captures(declarator.trim()) else {
                    continue;
                };
                let name = &parts[1];
                if let Some(names) = ground_truth {
                    if !names.contains(name) {
                        continue;
                    }
                }

                let trailing = original_lines
                    .get(line_index)
                    .map(|line| trailing_text(line, name))
                    .unwrap_or_default();

                let declaration = RawDeclaration {
                    keyword,
                    precision: precision.clone(),
                    type_token: caps[2].to_string(),
                    name: name.to_string(),
                    array_size: parts.get(2).map(|m| m.as_str().trim().to_string()),
                    trailing,
                    line: line_index + 1,
                };
                crate::shader_trace!("shader_meta::scan",
                    "line {}: {} {} {}", declaration.line, keyword.as_str(),
                    declaration.type_token, declaration.name);
                declarations.push(declaration);
            }
        }

        declarations
    }
}

/// Text after the `;` that terminates `name`'s declaration on `line`
fn trailing_text(line: &str, name: &str) -> String {
    let line = line.trim_end_matches('\r');
    let search_from = find_token(line, name).map(|pos| pos + name.len()).unwrap_or(0);
    match line[search_from..].find(';') {
        Some(offset) => line[search_from + offset + 1..].trim().to_string(),
        None => String::new(),
    }
}

/// Byte offset of the first whole-token occurrence of `token` in `line`
fn find_token(line: &str, token: &str) -> Option<usize> {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut start = 0;
    while let Some(offset) = line[start..].find(token) {
        let pos = start + offset;
        let end = pos + token.len();
        let before_ok = line[..pos].chars().next_back().map_or(true, |c| !is_ident(c));
        let after_ok = line[end..].chars().next().map_or(true, |c| !is_ident(c));
        if before_ok && after_ok {
            return Some(pos);
        }
        start = end;
    }
    None
}

#[cfg(test)]
#[path = "declarations_tests.rs"]
mod tests;
