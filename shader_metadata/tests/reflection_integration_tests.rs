//! Integration tests for the reflection extraction path
//!
//! Uses a scripted GraphicsContext standing in for a driver. No GPU required.
//!
//! Run with: cargo test --test reflection_integration_tests

use shader_metadata::shader_meta::metadata::{GL_FLOAT, GL_FLOAT_MAT4, GL_FLOAT_VEC3, GL_FLOAT_VEC4, GL_SAMPLER_2D};
use shader_metadata::shader_meta::{
    ActiveVariable, GlslType, GraphicsContext, MetadataSource, ReflectionAdapter, ShaderInfo,
    ShaderStage, StaticExtractor,
};

// ============================================================================
// SCRIPTED DRIVER
// ============================================================================

/// Driver double: compiles anything without `#error`, links anything
#[derive(Default)]
struct ScriptedDriver {
    uniforms: Vec<ActiveVariable>,
    attributes: Vec<ActiveVariable>,
    link_log: Option<String>,
    live_objects: i32,
}

impl GraphicsContext for ScriptedDriver {
    type Shader = ShaderStage;
    type Program = ();

    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderStage, String> {
        if source.contains("#error") {
            return Err(format!("ERROR: 0:1: '#error' : {} stage rejected", stage));
        }
        self.live_objects += 1;
        Ok(stage)
    }

    fn link_program(&mut self, _vertex: &ShaderStage, _fragment: &ShaderStage) -> Result<(), String> {
        match &self.link_log {
            Some(log) => Err(log.clone()),
            None => {
                self.live_objects += 1;
                Ok(())
            }
        }
    }

    fn active_uniforms(&mut self, _program: &()) -> Vec<ActiveVariable> {
        self.uniforms.clone()
    }

    fn active_attributes(&mut self, _program: &()) -> Vec<ActiveVariable> {
        self.attributes.clone()
    }

    fn delete_shader(&mut self, _shader: ShaderStage) {
        self.live_objects -= 1;
    }

    fn delete_program(&mut self, _program: ()) {
        self.live_objects -= 1;
    }
}

const VERTEX: &str = "attribute vec3 aPosition;\nuniform mat4 uMvp;\nuniform vec3 uSize; // {min: 0, max: 10}\nvoid main() {}";
const FRAGMENT: &str = "uniform vec4 uColor; // {ui: \"color\"}\nuniform sampler2D sTexture;\nuniform float uKernel[9];\nvoid main() {}";

fn driver() -> ScriptedDriver {
    ScriptedDriver {
        uniforms: vec![
            ActiveVariable::new("uMvp", GL_FLOAT_MAT4, 1),
            ActiveVariable::new("uSize", GL_FLOAT_VEC3, 1),
            ActiveVariable::new("uColor", GL_FLOAT_VEC4, 1),
            ActiveVariable::new("sTexture", GL_SAMPLER_2D, 1),
            ActiveVariable::new("uKernel[0]", GL_FLOAT, 9),
        ],
        attributes: vec![ActiveVariable::new("aPosition", GL_FLOAT_VEC3, 1)],
        ..Default::default()
    }
}

// ============================================================================
// REFLECTION TESTS
// ============================================================================

#[test]
fn test_integration_reflection_success() {
    let mut ctx = driver();
    let meta = ShaderInfo::from_compilation(&mut ctx, VERTEX, FRAGMENT).unwrap();

    assert!(!meta.has_error);
    assert_eq!(meta.uniforms.len(), 5);
    assert_eq!(meta.uniforms["sTexture"].ty, GlslType::Sampler2D);
    assert_eq!(meta.uniforms["uKernel[0]"].count, 9);
    assert_eq!(meta.uniform_count, 13);
    assert_eq!(meta.attributes["aPosition"].ty.gl_type_name(), "FLOAT_VEC3");
    assert_eq!(ctx.live_objects, 0);
}

#[test]
fn test_integration_reflection_ui_specs() {
    let mut ctx = driver();
    let meta = ShaderInfo::from_compilation(&mut ctx, VERTEX, FRAGMENT).unwrap();

    assert_eq!(meta.ui_spec("uSize").and_then(|s| s["max"].as_f64()), Some(10.0));
    assert_eq!(meta.ui_spec("uColor").and_then(|s| s["ui"].as_str()), Some("color"));
}

#[test]
fn test_integration_reflection_compile_failure() {
    let mut ctx = driver();
    let fragment = "#error unsupported\nvoid main() {}";
    let meta = ShaderInfo::from_compilation(&mut ctx, VERTEX, fragment).unwrap();

    assert!(meta.has_error);
    assert!(meta.vertex_error.is_empty());
    assert!(meta.fragment_error.contains("Fragment stage rejected"));
    assert!(meta.uniforms.is_empty());
    assert_eq!(ctx.live_objects, 0);
}

#[test]
fn test_integration_reflection_link_failure() {
    let mut ctx = driver();
    ctx.link_log = Some("Varyings do not match".to_string());
    let meta = ShaderInfo::from_compilation(&mut ctx, VERTEX, FRAGMENT).unwrap();

    assert!(meta.has_error);
    assert_eq!(meta.link_error, "Varyings do not match");
    assert!(meta.error_summary().starts_with("link:"));
    assert_eq!(ctx.live_objects, 0);
}

// ============================================================================
// BOTH FRONT-ENDS THROUGH THE SAME TRAIT
// ============================================================================

#[test]
fn test_integration_front_ends_agree_on_base_types() {
    let mut ctx = driver();
    let mut reflection = ReflectionAdapter::new(&mut ctx);
    let mut text = StaticExtractor::new();

    let sources: [&mut dyn MetadataSource; 2] = [&mut reflection, &mut text];
    let results: Vec<_> = sources
        .into_iter()
        .map(|source| source.extract(VERTEX, FRAGMENT).unwrap())
        .collect();

    for name in ["uMvp", "uSize", "uColor", "sTexture"] {
        assert_eq!(results[0].uniforms[name].ty, results[1].uniforms[name].ty, "{}", name);
        assert_eq!(results[0].uniforms[name].stages, results[1].uniforms[name].stages, "{}", name);
    }
    assert_eq!(results[0].uniform_ui_spec, results[1].uniform_ui_spec);
    // the static path expands arrays, the driver reports one entry
    assert!(results[1].uniforms.contains_key("uKernel[8]"));
    assert!(!results[0].uniforms.contains_key("uKernel[8]"));
}
