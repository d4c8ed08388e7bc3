/*!
# Shader Metadata

Uniform and attribute metadata extraction for GLSL vertex/fragment shader pairs.

Given raw shader source, this crate determines the uniform and attribute
variables, their types, array arity and the optional UI-authoring hints
embedded in trailing comments:

```glsl
uniform float uAlpha; // {ui: "slider", min: 0, max: 1}
```

## Architecture

- **StaticExtractor**: text-only path (comment stripping, `#define`
  resolution, declaration scanning, struct expansion, UI spec parsing)
- **ReflectionAdapter**: driver path over a [`GraphicsContext`](shader_meta::reflect::GraphicsContext)
  (compile, link, enumerate active variables)
- **MetadataMerger**: combines vertex and fragment results into one `ShaderMetadata`
- **ShaderInfo**: entry points and the global logger

Backend implementations (OpenGL / WebGL through `glow`, ...) provide the
`GraphicsContext` used by the reflection path.
*/

// Internal modules
mod error;
mod config;
mod metadata_source;
mod shader_info;
pub mod log;
pub mod metadata;
pub mod parse;
pub mod reflect;

// Main shader_meta namespace module
pub mod shader_meta {
    // Error types
    pub use crate::error::{Error, Result};

    // Entry points and configuration
    pub use crate::shader_info::ShaderInfo;
    pub use crate::config::ExtractionConfig;
    pub use crate::metadata_source::MetadataSource;

    // Front-ends and merger
    pub use crate::parse::StaticExtractor;
    pub use crate::reflect::{ReflectionAdapter, GraphicsContext, ActiveVariable};
    pub use crate::metadata::{
        MetadataMerger, ShaderMetadata, StageMetadata, UniformInfo, UniformKind,
        AttributeInfo, UiSpec, GlslType, UniformValue,
        ShaderStage, ShaderStageFlags,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Result model sub-module
    pub mod metadata {
        pub use crate::metadata::*;
    }

    // Static path sub-module
    pub mod parse {
        pub use crate::parse::*;
    }

    // Reflection path sub-module
    pub mod reflect {
        pub use crate::reflect::*;
    }
}

// Re-export math library at crate root
pub use glam;

// Re-export the JSON value type used by UI specs
pub use serde_json;
