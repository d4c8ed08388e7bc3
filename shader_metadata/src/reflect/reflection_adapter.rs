/// Reflection extraction path
///
/// The driver compiles and links the shader pair and is the ground truth
/// for names, types and sizes. The source text is only scanned to find
/// which stage declares a variable and to pick up trailing UI spec
/// comments.
///
/// Compile and link failures do not produce an `Err`: they are recorded in
/// the returned metadata (`has_error` plus the matching error string) with
/// empty maps.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::metadata::{
    AttributeInfo, GlslType, MetadataMerger, ShaderMetadata, ShaderStage, StageMetadata,
    UiSpec, UniformInfo, UniformKind,
};
use crate::metadata_source::MetadataSource;
use crate::parse::{CommentStripper, DeclarationKeyword, DeclarationScanner, UiSpecParser};
use crate::reflect::{ActiveVariable, GraphicsContext};

const SOURCE: &str = "shader_meta::reflect";

/// Extracts shader metadata through a live graphics context
pub struct ReflectionAdapter<'a, C: GraphicsContext> {
    context: &'a mut C,
}

impl<'a, C: GraphicsContext> ReflectionAdapter<'a, C> {
    pub fn new(context: &'a mut C) -> Self {
        Self { context }
    }

    /// Compile, link and enumerate the active variables of a shader pair
    ///
    /// # Errors
    ///
    /// `UnknownTypeTag` when the driver reports a type outside the
    /// supported table. Compile and link failures are reported through the
    /// returned metadata instead.
    pub fn reflect(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata> {
        let mut result = ShaderMetadata::new(vertex_source, fragment_source);

        let vertex = self.compile(ShaderStage::Vertex, vertex_source, &mut result);
        let fragment = self.compile(ShaderStage::Fragment, fragment_source, &mut result);

        let (vertex, fragment) = match (vertex, fragment) {
            (Some(vertex), Some(fragment)) => (vertex, fragment),
            (vertex, fragment) => {
                vertex.into_iter().chain(fragment).for_each(|s| self.context.delete_shader(s));
                return Ok(result);
            }
        };

        let linked = self.context.link_program(&vertex, &fragment);
        self.context.delete_shader(vertex);
        self.context.delete_shader(fragment);

        let program = match linked {
            Ok(program) => program,
            Err(log) => {
                crate::shader_error!(SOURCE, "{}", Error::LinkError(log.clone()));
                result.set_link_error(log);
                return Ok(result);
            }
        };

        let uniforms = self.context.active_uniforms(&program);
        let attributes = self.context.active_attributes(&program);
        self.context.delete_program(program);

        let mut merged = Self::build(vertex_source, fragment_source, &uniforms, &attributes)?;
        merged.uniform_count = uniforms.iter().map(|u| u.size).sum();
        merged.attribute_count = attributes.iter().map(|a| a.size).sum();

        crate::shader_debug!(SOURCE, "Reflected {} uniforms ({} slots), {} attributes",
            merged.uniforms.len(), merged.uniform_count, merged.attributes.len());
        Ok(merged)
    }

    fn compile(&mut self, stage: ShaderStage, source: &str, result: &mut ShaderMetadata) -> Option<C::Shader> {
        match self.context.compile_stage(stage, source) {
            Ok(shader) => Some(shader),
            Err(log) => {
                crate::shader_error!(SOURCE, "{}", Error::StageCompileError { stage, log: log.clone() });
                result.set_stage_error(stage, log);
                None
            }
        }
    }

    /// Turn the driver's variables into per-stage metadata and merge it
    fn build(
        vertex_source: &str,
        fragment_source: &str,
        uniforms: &[ActiveVariable],
        attributes: &[ActiveVariable],
    ) -> Result<ShaderMetadata> {
        let uniform_names: FxHashSet<String> =
            uniforms.iter().map(|u| u.base_name().to_string()).collect();

        let vertex_scan = StageScan::new(vertex_source, &uniform_names);
        let fragment_scan = StageScan::new(fragment_source, &uniform_names);

        let mut vertex = StageMetadata::new(ShaderStage::Vertex, vertex_source);
        let mut fragment = StageMetadata::new(ShaderStage::Fragment, fragment_source);

        for variable in uniforms {
            let ty = Self::map_type(variable)?;
            let base = variable.base_name();
            let in_vertex = vertex_scan.uniforms.contains(base);
            let in_fragment = fragment_scan.uniforms.contains(base);

            // Declared through a form the scanner does not recognize: keep it on both stages
            let (in_vertex, in_fragment) = if in_vertex || in_fragment {
                (in_vertex, in_fragment)
            } else {
                (true, true)
            };
            if in_vertex {
                vertex.insert_uniform(Self::uniform_info(variable, ty, ShaderStage::Vertex));
            }
            if in_fragment {
                fragment.insert_uniform(Self::uniform_info(variable, ty, ShaderStage::Fragment));
            }
        }

        // Attributes only exist in the vertex stage
        for variable in attributes {
            let ty = Self::map_type(variable)?;
            let mut info = AttributeInfo::new(&variable.name, ty, ShaderStage::Vertex);
            info.count = variable.size;
            vertex.insert_attribute(info);
        }

        vertex.ui_specs = vertex_scan.ui_specs;
        fragment.ui_specs = fragment_scan.ui_specs;

        Ok(MetadataMerger::merge(vertex, fragment))
    }

    fn map_type(variable: &ActiveVariable) -> Result<GlslType> {
        GlslType::from_gl_type_tag(variable.type_tag).ok_or_else(|| {
            Error::UnknownTypeTag {
                name: variable.name.clone(),
                tag: variable.type_tag,
            }
            .logged(SOURCE)
        })
    }

    /// Driver sizes are recorded as reported, no array reconstruction
    fn uniform_info(variable: &ActiveVariable, ty: GlslType, stage: ShaderStage) -> UniformInfo {
        let arrayed = variable.size > 1;
        UniformInfo {
            name: variable.name.clone(),
            ty,
            count: if arrayed { variable.size } else { 0 },
            index: 0,
            kind: if arrayed { UniformKind::Array } else { UniformKind::Scalar },
            stages: stage.flag(),
        }
    }
}

/// Declarations of the reflected variables found in one stage's source
struct StageScan {
    uniforms: FxHashSet<String>,
    ui_specs: BTreeMap<String, UiSpec>,
}

impl StageScan {
    fn new(source: &str, uniform_names: &FxHashSet<String>) -> Self {
        let stripped = CommentStripper::strip(source);
        let mut scan = StageScan {
            uniforms: FxHashSet::default(),
            ui_specs: BTreeMap::new(),
        };

        for decl in DeclarationScanner::scan(&stripped, source, DeclarationKeyword::Uniform, Some(uniform_names)) {
            match UiSpecParser::parse(&decl.trailing) {
                Ok(Some(spec)) => {
                    scan.ui_specs.insert(decl.name.clone(), spec);
                }
                Ok(None) => {}
                Err(e) => {
                    crate::shader_warn!(SOURCE,
                        "{}, using an empty spec",
                        Error::InvalidUiSpec { declaration: decl.name.clone(), reason: e.to_string() });
                    scan.ui_specs.insert(decl.name.clone(), UiSpec::new());
                }
            }
            scan.uniforms.insert(decl.name);
        }

        scan
    }
}

impl<C: GraphicsContext> MetadataSource for ReflectionAdapter<'_, C> {
    fn extract(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata> {
        self.reflect(vertex_source, fragment_source)
    }
}

#[cfg(test)]
#[path = "reflection_adapter_tests.rs"]
mod tests;
