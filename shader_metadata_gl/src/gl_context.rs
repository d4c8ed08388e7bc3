/// glow-backed graphics context
///
/// Every call goes straight to the driver. Objects returned by
/// `compile_stage` / `link_program` are owned by the caller and released
/// through `delete_shader` / `delete_program`.

use glow::HasContext;
use shader_metadata::shader_meta::{ActiveVariable, GraphicsContext, ShaderStage};

const SOURCE: &str = "shader_meta::gl";

/// OpenGL / WebGL graphics context borrowed from the application
pub struct GlGraphicsContext<'a, G: HasContext> {
    gl: &'a G,
}

impl<'a, G: HasContext> GlGraphicsContext<'a, G> {
    /// Wrap a context that is current on this thread
    pub fn new(gl: &'a G) -> Self {
        Self { gl }
    }
}

/// GL shader object type for a stage
pub(crate) fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Driver-reported variable; negative sizes are clamped to 0
pub(crate) fn active_variable(name: &str, type_tag: u32, size: i32) -> ActiveVariable {
    ActiveVariable::new(name, type_tag, u32::try_from(size).unwrap_or(0))
}

/// Empty info logs still need a readable message
pub(crate) fn failure_log(log: String, what: &str) -> String {
    let log = log.trim().to_string();
    if log.is_empty() {
        format!("{} failed without an info log", what)
    } else {
        log
    }
}

impl<G: HasContext> GraphicsContext for GlGraphicsContext<'_, G> {
    type Shader = G::Shader;
    type Program = G::Program;

    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<G::Shader, String> {
        unsafe {
            let shader = self
                .gl
                .create_shader(shader_type(stage))
                .map_err(|e| format!("glCreateShader failed: {}", e))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if self.gl.get_shader_compile_status(shader) {
                shader_metadata::shader_trace!(SOURCE, "{} shader compiled", stage);
                return Ok(shader);
            }

            let log = failure_log(self.gl.get_shader_info_log(shader), "Compilation");
            self.gl.delete_shader(shader);
            Err(log)
        }
    }

    fn link_program(&mut self, vertex: &G::Shader, fragment: &G::Shader) -> Result<G::Program, String> {
        unsafe {
            let program = self
                .gl
                .create_program()
                .map_err(|e| format!("glCreateProgram failed: {}", e))?;
            self.gl.attach_shader(program, *vertex);
            self.gl.attach_shader(program, *fragment);
            self.gl.link_program(program);
            self.gl.detach_shader(program, *vertex);
            self.gl.detach_shader(program, *fragment);

            if self.gl.get_program_link_status(program) {
                shader_metadata::shader_trace!(SOURCE, "Program linked");
                return Ok(program);
            }

            let log = failure_log(self.gl.get_program_info_log(program), "Link");
            self.gl.delete_program(program);
            Err(log)
        }
    }

    fn active_uniforms(&mut self, program: &G::Program) -> Vec<ActiveVariable> {
        unsafe {
            let count = self.gl.get_active_uniforms(*program);
            (0..count)
                .filter_map(|index| self.gl.get_active_uniform(*program, index))
                .map(|u| active_variable(&u.name, u.utype, u.size))
                .collect()
        }
    }

    fn active_attributes(&mut self, program: &G::Program) -> Vec<ActiveVariable> {
        unsafe {
            let count = self.gl.get_active_attributes(*program);
            (0..count)
                .filter_map(|index| self.gl.get_active_attribute(*program, index))
                .map(|a| active_variable(&a.name, a.atype, a.size))
                .collect()
        }
    }

    fn delete_shader(&mut self, shader: G::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn delete_program(&mut self, program: G::Program) {
        unsafe { self.gl.delete_program(program) }
    }
}

#[cfg(test)]
#[path = "gl_context_tests.rs"]
mod tests;
