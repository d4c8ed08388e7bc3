/// Parse module - static extraction path

// Module declarations
pub mod comments;
pub mod expr;
pub mod defines;
pub mod declarations;
pub mod structs;
pub mod ui_spec_parser;
pub mod static_extractor;

// Re-export everything
pub use comments::*;
pub use expr::{evaluate, EvalError, Literal};
pub use defines::*;
pub use declarations::*;
pub use structs::*;
pub use ui_spec_parser::*;
pub use static_extractor::*;
