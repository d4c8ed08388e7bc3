/// Shader metadata model
///
/// `StageMetadata` is what one extraction front-end produces for a single
/// shader stage; `ShaderMetadata` is the merged, caller-facing result for a
/// vertex + fragment pair.

use std::collections::BTreeMap;

use crate::metadata::{GlslType, ShaderStage, ShaderStageFlags, UiSpec};

// ============================================================================
// Uniforms and attributes
// ============================================================================

/// Shape of a uniform entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformKind {
    /// Plain `uniform vec3 uSize;`
    Scalar,
    /// One element of `uniform float uWeights[4];`
    Array,
    /// One field of a struct-typed uniform (`uLight.color`, `uLights[1].color`)
    StructField {
        /// Declared struct type (`Light`)
        struct_type: String,
        /// Declared variable name (`uLight`)
        struct_name: String,
    },
}

/// Metadata for one uniform entry
#[derive(Debug, Clone, PartialEq)]
pub struct UniformInfo {
    /// Fully qualified name (`uLight[2].color`), also the map key
    pub name: String,
    /// Base type (the field type for struct fields)
    pub ty: GlslType,
    /// Array arity, 0 if not arrayed
    pub count: u32,
    /// Position within the array, 0 if not arrayed
    pub index: u32,
    pub kind: UniformKind,
    /// Stages declaring this uniform
    pub stages: ShaderStageFlags,
}

impl UniformInfo {
    /// Non-arrayed uniform
    pub fn scalar(name: &str, ty: GlslType, stage: ShaderStage) -> Self {
        Self {
            name: name.to_string(),
            ty,
            count: 0,
            index: 0,
            kind: UniformKind::Scalar,
            stages: stage.flag(),
        }
    }

    /// Element `index` of an array uniform, named `base[index]`
    pub fn array_element(base: &str, ty: GlslType, index: u32, count: u32, stage: ShaderStage) -> Self {
        Self {
            name: format!("{}[{}]", base, index),
            ty,
            count,
            index,
            kind: UniformKind::Array,
            stages: stage.flag(),
        }
    }

    /// Declared type name: the base type, or the owning struct type for fields
    pub fn type_name(&self) -> &str {
        match &self.kind {
            UniformKind::StructField { struct_type, .. } => struct_type,
            _ => self.ty.as_str(),
        }
    }

    pub fn struct_type(&self) -> Option<&str> {
        match &self.kind {
            UniformKind::StructField { struct_type, .. } => Some(struct_type),
            _ => None,
        }
    }

    pub fn struct_name(&self) -> Option<&str> {
        match &self.kind {
            UniformKind::StructField { struct_name, .. } => Some(struct_name),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.count > 0
    }

    /// Overwrite every field with `other`'s, keeping the union of stages
    pub fn merge_from(&mut self, other: &UniformInfo) {
        let stages = self.stages | other.stages;
        *self = other.clone();
        self.stages = stages;
    }
}

/// Metadata for one vertex attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    /// Attribute name, also the map key
    pub name: String,
    pub ty: GlslType,
    /// Array length (driver-reported size on the reflection path), 0 if not arrayed
    pub count: u32,
    pub stages: ShaderStageFlags,
}

impl AttributeInfo {
    pub fn new(name: &str, ty: GlslType, stage: ShaderStage) -> Self {
        Self {
            name: name.to_string(),
            ty,
            count: 0,
            stages: stage.flag(),
        }
    }

    /// Overwrite every field with `other`'s, keeping the union of stages
    pub fn merge_from(&mut self, other: &AttributeInfo) {
        let stages = self.stages | other.stages;
        *self = other.clone();
        self.stages = stages;
    }
}

// ============================================================================
// Per-stage result
// ============================================================================

/// Metadata extracted from a single shader stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageMetadata {
    pub stage: ShaderStage,
    /// Raw stage source
    pub source: String,
    pub uniforms: BTreeMap<String, UniformInfo>,
    /// Uniform names in declaration order
    pub uniform_order: Vec<String>,
    pub attributes: BTreeMap<String, AttributeInfo>,
    /// Attribute names in declaration order
    pub attribute_order: Vec<String>,
    /// UI specs keyed by declared variable name
    pub ui_specs: BTreeMap<String, UiSpec>,
}

impl StageMetadata {
    pub fn new(stage: ShaderStage, source: &str) -> Self {
        Self {
            stage,
            source: source.to_string(),
            uniforms: BTreeMap::new(),
            uniform_order: Vec::new(),
            attributes: BTreeMap::new(),
            attribute_order: Vec::new(),
            ui_specs: BTreeMap::new(),
        }
    }

    /// Insert a uniform; a later entry with the same name replaces the earlier one
    pub fn insert_uniform(&mut self, info: UniformInfo) {
        if !self.uniforms.contains_key(&info.name) {
            self.uniform_order.push(info.name.clone());
        }
        self.uniforms.insert(info.name.clone(), info);
    }

    /// Insert an attribute; a later entry with the same name replaces the earlier one
    pub fn insert_attribute(&mut self, info: AttributeInfo) {
        if !self.attributes.contains_key(&info.name) {
            self.attribute_order.push(info.name.clone());
        }
        self.attributes.insert(info.name.clone(), info);
    }

    /// Drop every uniform entry and UI spec left by a declaration of `declared_name`
    ///
    /// Removes `name`, `name[i]`, `name.field` and `name[i].field` entries, so
    /// a redeclaration with a different shape leaves no stale entries.
    pub fn remove_uniform_declaration(&mut self, declared_name: &str) {
        let stale = |entry: &str| {
            entry
                .strip_prefix(declared_name)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('[') || rest.starts_with('.'))
        };
        self.uniforms.retain(|name, _| !stale(name));
        self.uniform_order.retain(|name| !stale(name));
        self.ui_specs.remove(declared_name);
    }

    pub fn insert_ui_spec(&mut self, name: &str, spec: UiSpec) {
        self.ui_specs.insert(name.to_string(), spec);
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty() && self.attributes.is_empty()
    }
}

// ============================================================================
// Merged result
// ============================================================================

/// Metadata for a vertex + fragment shader pair
///
/// Created fresh by each extraction call. On compile/link failure (reflection
/// path) or static analysis failure (lenient static entry point) the maps are
/// empty and `has_error` is set together with the matching error string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderMetadata {
    pub vertex_source: String,
    pub fragment_source: String,
    pub uniforms: BTreeMap<String, UniformInfo>,
    pub attributes: BTreeMap<String, AttributeInfo>,
    /// UI specs keyed by declared variable name
    pub uniform_ui_spec: BTreeMap<String, UiSpec>,
    /// Uniform names in declaration order (vertex first, then fragment-only)
    pub uniform_order: Vec<String>,
    /// Attribute names in declaration order
    pub attribute_order: Vec<String>,
    /// Number of uniform slots (sum of driver sizes on the reflection path)
    pub uniform_count: u32,
    /// Number of attribute slots (sum of driver sizes on the reflection path)
    pub attribute_count: u32,
    pub has_error: bool,
    pub vertex_error: String,
    pub fragment_error: String,
    pub link_error: String,
}

impl ShaderMetadata {
    /// Empty metadata for a shader pair
    pub fn new(vertex_source: &str, fragment_source: &str) -> Self {
        Self {
            vertex_source: vertex_source.to_string(),
            fragment_source: fragment_source.to_string(),
            ..Default::default()
        }
    }

    /// Record a stage failure
    pub fn set_stage_error(&mut self, stage: ShaderStage, message: String) {
        self.has_error = true;
        match stage {
            ShaderStage::Vertex => self.vertex_error = message,
            ShaderStage::Fragment => self.fragment_error = message,
        }
    }

    /// Record a link failure
    pub fn set_link_error(&mut self, message: String) {
        self.has_error = true;
        self.link_error = message;
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformInfo> {
        self.uniforms.get(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.get(name)
    }

    pub fn ui_spec(&self, name: &str) -> Option<&UiSpec> {
        self.uniform_ui_spec.get(name)
    }

    /// Uniforms in declaration order (struct fields in struct declaration order)
    pub fn uniforms_in_order(&self) -> impl Iterator<Item = &UniformInfo> + '_ {
        self.uniform_order
            .iter()
            .filter_map(move |name| self.uniforms.get(name))
    }

    /// Attributes in declaration order
    pub fn attributes_in_order(&self) -> impl Iterator<Item = &AttributeInfo> + '_ {
        self.attribute_order
            .iter()
            .filter_map(move |name| self.attributes.get(name))
    }

    /// Error strings joined for display (empty when `has_error` is false)
    pub fn error_summary(&self) -> String {
        [
            ("vertex", &self.vertex_error),
            ("fragment", &self.fragment_error),
            ("link", &self.link_error),
        ]
        .iter()
        .filter(|(_, msg)| !msg.is_empty())
        .map(|(label, msg)| format!("{}: {}", label, msg))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[cfg(test)]
#[path = "shader_metadata_tests.rs"]
mod tests;
