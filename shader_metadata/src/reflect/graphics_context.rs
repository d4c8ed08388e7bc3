/// Graphics context trait - driver capability used by the reflection path
///
/// Backends compile, link and enumerate active variables. Failures are
/// returned as the driver's raw info log, the reflection adapter decides
/// how to report them.

use crate::metadata::ShaderStage;

/// An active uniform or attribute as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    /// Driver name (`uLight.color`, `uWeights[0]`)
    pub name: String,
    /// Numeric type tag (`GL_FLOAT_VEC3`...)
    pub type_tag: u32,
    /// Array size, 1 when not arrayed
    pub size: u32,
}

impl ActiveVariable {
    pub fn new(name: &str, type_tag: u32, size: u32) -> Self {
        Self {
            name: name.to_string(),
            type_tag,
            size,
        }
    }

    /// Declared variable name: `uLight[2].color` -> `uLight`
    pub fn base_name(&self) -> &str {
        let end = self
            .name
            .find(|c| c == '[' || c == '.')
            .unwrap_or(self.name.len());
        &self.name[..end]
    }
}

/// Compile / link / enumerate capability of a live graphics context
pub trait GraphicsContext {
    /// Compiled shader object handle
    type Shader;
    /// Linked program object handle
    type Program;

    /// Compile one stage, `Err` carries the compile log
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    /// Link a program from compiled stages, `Err` carries the link log
    fn link_program(&mut self, vertex: &Self::Shader, fragment: &Self::Shader) -> Result<Self::Program, String>;

    /// Active uniforms of a linked program
    fn active_uniforms(&mut self, program: &Self::Program) -> Vec<ActiveVariable>;

    /// Active attributes of a linked program
    fn active_attributes(&mut self, program: &Self::Program) -> Vec<ActiveVariable>;

    fn delete_shader(&mut self, shader: Self::Shader);

    fn delete_program(&mut self, program: Self::Program);
}
