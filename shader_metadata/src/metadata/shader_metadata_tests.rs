//! Unit tests for shader_metadata.rs
//!
//! Tests UniformInfo helpers, StageMetadata insertion rules and the
//! ShaderMetadata error fields.

use crate::metadata::*;

// ============================================================================
// UNIFORM INFO TESTS
// ============================================================================

#[test]
fn test_uniform_info_scalar() {
    let info = UniformInfo::scalar("uSize", GlslType::Vec3, ShaderStage::Vertex);
    assert_eq!(info.name, "uSize");
    assert_eq!(info.count, 0);
    assert_eq!(info.index, 0);
    assert_eq!(info.kind, UniformKind::Scalar);
    assert_eq!(info.type_name(), "vec3");
    assert!(!info.is_array());
    assert_eq!(info.stages, ShaderStageFlags::VERTEX);
}

#[test]
fn test_uniform_info_array_element() {
    let info = UniformInfo::array_element("uWeights", GlslType::Float, 2, 4, ShaderStage::Fragment);
    assert_eq!(info.name, "uWeights[2]");
    assert_eq!(info.count, 4);
    assert_eq!(info.index, 2);
    assert!(info.is_array());
    assert_eq!(info.struct_type(), None);
}

#[test]
fn test_uniform_info_struct_field_type_name() {
    let info = UniformInfo {
        name: "uLight.color".to_string(),
        ty: GlslType::Vec4,
        count: 0,
        index: 0,
        kind: UniformKind::StructField {
            struct_type: "Light".to_string(),
            struct_name: "uLight".to_string(),
        },
        stages: ShaderStageFlags::FRAGMENT,
    };
    assert_eq!(info.type_name(), "Light");
    assert_eq!(info.struct_type(), Some("Light"));
    assert_eq!(info.struct_name(), Some("uLight"));
    assert_eq!(info.ty, GlslType::Vec4);
}

#[test]
fn test_uniform_merge_keeps_stage_union() {
    let mut vertex = UniformInfo::scalar("uColor", GlslType::Vec3, ShaderStage::Vertex);
    let fragment = UniformInfo::scalar("uColor", GlslType::Vec4, ShaderStage::Fragment);
    vertex.merge_from(&fragment);

    assert_eq!(vertex.ty, GlslType::Vec4);
    assert_eq!(vertex.stages, ShaderStageFlags::VERTEX_FRAGMENT);
}

// ============================================================================
// STAGE METADATA TESTS
// ============================================================================

#[test]
fn test_stage_metadata_last_declaration_wins() {
    let mut stage = StageMetadata::new(ShaderStage::Vertex, "");
    stage.insert_uniform(UniformInfo::scalar("uA", GlslType::Float, ShaderStage::Vertex));
    stage.insert_uniform(UniformInfo::scalar("uB", GlslType::Float, ShaderStage::Vertex));
    stage.insert_uniform(UniformInfo::scalar("uA", GlslType::Vec2, ShaderStage::Vertex));

    assert_eq!(stage.uniforms.len(), 2);
    assert_eq!(stage.uniforms["uA"].ty, GlslType::Vec2);
    assert_eq!(stage.uniform_order, vec!["uA", "uB"]);
}

#[test]
fn test_remove_uniform_declaration_drops_all_shapes() {
    let mut stage = StageMetadata::new(ShaderStage::Fragment, "");
    for index in 0..3 {
        stage.insert_uniform(UniformInfo::array_element("uA", GlslType::Float, index, 3, ShaderStage::Fragment));
    }
    stage.insert_uniform(UniformInfo::scalar("uAB", GlslType::Float, ShaderStage::Fragment));
    stage.insert_uniform(UniformInfo::scalar("uA.x", GlslType::Float, ShaderStage::Fragment));
    stage.insert_ui_spec("uA", UiSpec::new());
    stage.insert_ui_spec("uAB", UiSpec::new());

    stage.remove_uniform_declaration("uA");

    assert_eq!(stage.uniform_order, vec!["uAB"]);
    assert_eq!(stage.uniforms.keys().collect::<Vec<_>>(), vec!["uAB"]);
    assert!(!stage.ui_specs.contains_key("uA"));
    assert!(stage.ui_specs.contains_key("uAB"));
}

#[test]
fn test_stage_metadata_is_empty() {
    let mut stage = StageMetadata::new(ShaderStage::Vertex, "void main() {}");
    assert!(stage.is_empty());
    stage.insert_attribute(AttributeInfo::new("aPosition", GlslType::Vec3, ShaderStage::Vertex));
    assert!(!stage.is_empty());
    assert_eq!(stage.attribute_order, vec!["aPosition"]);
}

// ============================================================================
// SHADER METADATA TESTS
// ============================================================================

#[test]
fn test_new_metadata_has_no_error() {
    let meta = ShaderMetadata::new("vs", "fs");
    assert_eq!(meta.vertex_source, "vs");
    assert_eq!(meta.fragment_source, "fs");
    assert!(!meta.has_error);
    assert!(meta.error_summary().is_empty());
}

#[test]
fn test_stage_and_link_errors() {
    let mut meta = ShaderMetadata::new("vs", "fs");
    meta.set_stage_error(ShaderStage::Fragment, "bad token".to_string());
    assert!(meta.has_error);
    assert_eq!(meta.fragment_error, "bad token");
    assert!(meta.vertex_error.is_empty());

    meta.set_link_error("missing varying".to_string());
    assert_eq!(meta.error_summary(), "fragment: bad token\nlink: missing varying");
}

#[test]
fn test_in_order_iterators() {
    let mut stage = StageMetadata::new(ShaderStage::Vertex, "");
    stage.insert_uniform(UniformInfo::scalar("uZ", GlslType::Float, ShaderStage::Vertex));
    stage.insert_uniform(UniformInfo::scalar("uA", GlslType::Float, ShaderStage::Vertex));
    let meta = MetadataMerger::merge(stage, StageMetadata::new(ShaderStage::Fragment, ""));

    let names: Vec<&str> = meta.uniforms_in_order().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["uZ", "uA"]);
    let sorted: Vec<&str> = meta.uniforms.keys().map(|k| k.as_str()).collect();
    assert_eq!(sorted, vec!["uA", "uZ"]);
}
