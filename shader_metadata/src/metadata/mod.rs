/// Metadata module - result model shared by both extraction paths

// Module declarations
pub mod stage;
pub mod glsl_type;
pub mod ui_spec;
pub mod shader_metadata;
pub mod merger;

// Re-export everything
pub use stage::*;
pub use glsl_type::*;
pub use ui_spec::*;
pub use shader_metadata::*;
pub use merger::*;
