/// Reflect module - driver-backed extraction path

// Module declarations
pub mod graphics_context;
pub mod reflection_adapter;
pub mod mock_graphics_context;

// Re-export everything
pub use graphics_context::*;
pub use reflection_adapter::*;

#[cfg(test)]
pub use mock_graphics_context::*;
