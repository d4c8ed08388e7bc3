//! Unit tests for declarations.rs
//!
//! Tests the declaration grammar, trailing comment recovery and the
//! ground-truth filter.

use crate::parse::{CommentStripper, DeclarationKeyword, DeclarationScanner, RawDeclaration};
use rustc_hash::FxHashSet;

fn scan(source: &str, keyword: DeclarationKeyword) -> Vec<RawDeclaration> {
    let stripped = CommentStripper::strip(source);
    DeclarationScanner::scan(&stripped, source, keyword, None)
}

// ============================================================================
// GRAMMAR
// ============================================================================

#[test]
fn test_scan_precision_type_and_name() {
    let decls = scan("uniform mediump vec3 uSize;\nuniform float uTime;", DeclarationKeyword::Uniform);
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].precision.as_deref(), Some("mediump"));
    assert_eq!(decls[0].type_token, "vec3");
    assert_eq!(decls[0].name, "uSize");
    assert_eq!(decls[0].line, 1);
    assert_eq!(decls[1].precision, None);
    assert_eq!(decls[1].name, "uTime");
    assert_eq!(decls[1].line, 2);
}

#[test]
fn test_scan_array_suffix() {
    let decls = scan("uniform vec4 uLights[ MAX_LIGHTS ];", DeclarationKeyword::Uniform);
    assert_eq!(decls[0].array_size.as_deref(), Some("MAX_LIGHTS"));
}

#[test]
fn test_scan_declarator_list() {
    let decls = scan(
        "uniform highp float uA, uB[3] , uC; // {min: 0}",
        DeclarationKeyword::Uniform,
    );
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["uA", "uB", "uC"]);
    assert!(decls.iter().all(|d| d.type_token == "float"));
    assert!(decls.iter().all(|d| d.precision.as_deref() == Some("highp")));
    assert_eq!(decls[0].array_size, None);
    assert_eq!(decls[1].array_size.as_deref(), Some("3"));
    assert!(decls.iter().all(|d| d.trailing == "// {min: 0}"));
}

#[test]
fn test_scan_struct_type_token() {
    let decls = scan("uniform Light uLight;", DeclarationKeyword::Uniform);
    assert_eq!(decls[0].type_token, "Light");
}

#[test]
fn test_scan_keyword_selects_declarations() {
    let src = "attribute highp vec3 aPosition;\nuniform mat4 uMvp;\nvarying vec2 vUv;";
    let attributes = scan(src, DeclarationKeyword::Attribute);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].keyword, DeclarationKeyword::Attribute);
    assert_eq!(attributes[0].name, "aPosition");
    assert_eq!(scan(src, DeclarationKeyword::Uniform).len(), 1);
}

#[test]
fn test_scan_ignores_commented_out_declarations() {
    let src = "// uniform float uOld;\n/* uniform float uDead; */\nuniform float uLive;";
    let decls = scan(src, DeclarationKeyword::Uniform);
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].name, "uLive");
}

#[test]
fn test_scan_keyword_must_be_whole_word() {
    assert!(scan("nonuniform float uX;", DeclarationKeyword::Uniform).is_empty());
}

// ============================================================================
// TRAILING COMMENTS
// ============================================================================

#[test]
fn test_trailing_comment_is_recovered() {
    let decls = scan("uniform float uAlpha; // {min: 0, max: 1}", DeclarationKeyword::Uniform);
    assert_eq!(decls[0].trailing, "// {min: 0, max: 1}");
}

#[test]
fn test_trailing_text_of_two_declarations_on_one_line() {
    let decls = scan("uniform float uA; uniform float uB; // {max: 2}", DeclarationKeyword::Uniform);
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].trailing, "uniform float uB; // {max: 2}");
    assert_eq!(decls[1].trailing, "// {max: 2}");
}

#[test]
fn test_no_trailing_comment() {
    let decls = scan("uniform float uA;\n", DeclarationKeyword::Uniform);
    assert_eq!(decls[0].trailing, "");
}

#[test]
fn test_trailing_comment_after_block_comment_lines() {
    let src = "/* header\n   spans lines */\nuniform vec2 uRes; // {ui: \"size\"}";
    let decls = scan(src, DeclarationKeyword::Uniform);
    assert_eq!(decls[0].line, 3);
    assert_eq!(decls[0].trailing, "// {ui: \"size\"}");
}

// ============================================================================
// GROUND TRUTH FILTER
// ============================================================================

#[test]
fn test_ground_truth_filters_names() {
    let src = "uniform float uUsed;\nuniform float uOptimizedOut;";
    let mut names = FxHashSet::default();
    names.insert("uUsed".to_string());

    let decls = DeclarationScanner::scan(src, src, DeclarationKeyword::Uniform, Some(&names));
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].name, "uUsed");
}
