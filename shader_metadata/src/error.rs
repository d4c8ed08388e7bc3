//! Error types for shader metadata extraction
//!
//! This module defines the error types used by both extraction paths
//! (static source analysis and driver reflection), plus the helper
//! macros that log an error before returning it.

use std::fmt;

use crate::metadata::ShaderStage;

/// Result type for shader metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader metadata errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A shader stage failed to compile (carries the driver's info log)
    StageCompileError {
        stage: ShaderStage,
        log: String,
    },

    /// Program link failed after both stages compiled (driver's info log)
    LinkError(String),

    /// A declaration uses a type that is neither a base type nor a known struct
    UnknownStructType {
        type_name: String,
        declaration: String,
    },

    /// `#define` macros could not be resolved to literals
    MacroResolutionError {
        name: String,
        reason: String,
    },

    /// A trailing comment did not parse to an object literal
    InvalidUiSpec {
        declaration: String,
        reason: String,
    },

    /// An array suffix did not evaluate to a positive integer
    InvalidArraySize {
        declaration: String,
        size: String,
    },

    /// A base type is required here (attributes, struct fields)
    UnsupportedType {
        declaration: String,
        type_name: String,
    },

    /// The driver reported a type tag outside the supported table
    UnknownTypeTag {
        name: String,
        tag: u32,
    },

    /// Backend-specific error (GL object creation, context loss, ...)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StageCompileError { stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage, log)
            }
            Error::LinkError(log) => write!(f, "Program failed to link: {}", log),
            Error::UnknownStructType { type_name, declaration } => write!(
                f,
                "Unknown type '{}' for declaration '{}' (no matching struct definition)",
                type_name, declaration
            ),
            Error::MacroResolutionError { name, reason } => {
                write!(f, "Macro resolution failed for '{}': {}", name, reason)
            }
            Error::InvalidUiSpec { declaration, reason } => {
                write!(f, "Invalid UI spec for '{}': {}", declaration, reason)
            }
            Error::InvalidArraySize { declaration, size } => write!(
                f,
                "Invalid array size '{}' for declaration '{}'",
                size, declaration
            ),
            Error::UnsupportedType { declaration, type_name } => write!(
                f,
                "Unsupported type '{}' for declaration '{}'",
                type_name, declaration
            ),
            Error::UnknownTypeTag { name, tag } => {
                write!(f, "Unknown type tag 0x{:04X} reported for '{}'", tag, name)
            }
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Log this error under `source` and hand it back (internal use)
    pub(crate) fn logged(self, source: &str) -> Self {
        crate::shader_error!(source, "{}", self);
        self
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` with the same text
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_err;
/// let err = shader_err!("shader_meta::gl", "glCreateShader failed: {}", "context lost");
/// ```
#[macro_export]
macro_rules! shader_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::shader_error!($source, "{}", message);
        $crate::shader_meta::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_bail;
/// # fn f() -> shader_metadata::shader_meta::Result<()> {
/// shader_bail!("shader_meta::gl", "Program object is not valid");
/// # }
/// ```
#[macro_export]
macro_rules! shader_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::shader_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
