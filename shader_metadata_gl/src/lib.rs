/*!
# Shader Metadata - OpenGL / WebGL Backend

`GraphicsContext` implementation over the `glow` bindings, so the
reflection path of shader_metadata can run against a live OpenGL, OpenGL ES
or WebGL context.

```no_run
# fn demo(gl: &glow::Context) -> shader_metadata::shader_meta::Result<()> {
use shader_metadata::shader_meta::ShaderInfo;
use shader_metadata_gl::GlGraphicsContext;

let mut context = GlGraphicsContext::new(gl);
let meta = ShaderInfo::from_compilation(&mut context, "void main() {}", "void main() {}")?;
# Ok(())
# }
```
*/

mod gl_context;

pub use gl_context::GlGraphicsContext;
