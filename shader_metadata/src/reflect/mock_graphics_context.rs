/// Mock graphics context for unit tests (no GPU required)
///
/// Replays a scripted driver: compile/link failures and the active
/// variable lists are set up front, object creation and deletion are
/// counted so tests can check that nothing leaks.

#[cfg(test)]
use crate::metadata::ShaderStage;
#[cfg(test)]
use crate::reflect::{ActiveVariable, GraphicsContext};

// ============================================================================
// Mock objects
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockProgram {
    pub id: u32,
}

// ============================================================================
// Mock context
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockGraphicsContext {
    pub vertex_compile_error: Option<String>,
    pub fragment_compile_error: Option<String>,
    pub link_error: Option<String>,
    pub uniforms: Vec<ActiveVariable>,
    pub attributes: Vec<ActiveVariable>,

    pub compiled: Vec<ShaderStage>,
    pub shaders_alive: i32,
    pub programs_alive: i32,
    pub link_calls: u32,
}

#[cfg(test)]
impl MockGraphicsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uniform(mut self, name: &str, type_tag: u32, size: u32) -> Self {
        self.uniforms.push(ActiveVariable::new(name, type_tag, size));
        self
    }

    pub fn with_attribute(mut self, name: &str, type_tag: u32, size: u32) -> Self {
        self.attributes.push(ActiveVariable::new(name, type_tag, size));
        self
    }
}

#[cfg(test)]
impl GraphicsContext for MockGraphicsContext {
    type Shader = MockShader;
    type Program = MockProgram;

    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<MockShader, String> {
        self.compiled.push(stage);
        let error = match stage {
            ShaderStage::Vertex => &self.vertex_compile_error,
            ShaderStage::Fragment => &self.fragment_compile_error,
        };
        if let Some(log) = error {
            return Err(log.clone());
        }
        self.shaders_alive += 1;
        Ok(MockShader { stage, source: source.to_string() })
    }

    fn link_program(&mut self, _vertex: &MockShader, _fragment: &MockShader) -> Result<MockProgram, String> {
        self.link_calls += 1;
        if let Some(log) = &self.link_error {
            return Err(log.clone());
        }
        self.programs_alive += 1;
        Ok(MockProgram { id: self.link_calls })
    }

    fn active_uniforms(&mut self, _program: &MockProgram) -> Vec<ActiveVariable> {
        self.uniforms.clone()
    }

    fn active_attributes(&mut self, _program: &MockProgram) -> Vec<ActiveVariable> {
        self.attributes.clone()
    }

    fn delete_shader(&mut self, _shader: MockShader) {
        self.shaders_alive -= 1;
    }

    fn delete_program(&mut self, _program: MockProgram) {
        self.programs_alive -= 1;
    }
}
