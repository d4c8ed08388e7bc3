/// Shader metadata facade and global logger
///
/// `ShaderInfo` is the entry point used per shader-effect instance: it picks
/// an extraction front-end and owns the process-wide logger used by the
/// `shader_*!` macros.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::metadata::{MetadataMerger, ShaderMetadata, ShaderStage};
use crate::metadata_source::MetadataSource;
use crate::parse::StaticExtractor;
use crate::reflect::{GraphicsContext, ReflectionAdapter};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Shader metadata entry points
///
/// # Example
///
/// ```no_run
/// use shader_metadata::shader_meta::ShaderInfo;
///
/// let vertex = "attribute vec3 aPosition;\nuniform mat4 uMvp;\nvoid main() {}";
/// let fragment = "uniform vec4 uColor; // {min: 0, max: 1}\nvoid main() {}";
///
/// let info = ShaderInfo::from_source(vertex, fragment);
/// assert!(!info.has_error);
/// ```
pub struct ShaderInfo;

impl ShaderInfo {
    /// Static extraction, lenient
    ///
    /// Never fails: a stage whose analysis fails is reported through
    /// `has_error` and `vertex_error` / `fragment_error`, and the maps are
    /// left empty (no partial metadata).
    pub fn from_source(vertex_source: &str, fragment_source: &str) -> ShaderMetadata {
        Self::from_source_with_config(vertex_source, fragment_source, ExtractionConfig::default())
    }

    /// Static extraction, lenient, with explicit settings
    pub fn from_source_with_config(
        vertex_source: &str,
        fragment_source: &str,
        config: ExtractionConfig,
    ) -> ShaderMetadata {
        let extractor = StaticExtractor::with_config(config);
        let vertex = extractor.extract_stage(ShaderStage::Vertex, vertex_source);
        let fragment = extractor.extract_stage(ShaderStage::Fragment, fragment_source);

        match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => MetadataMerger::merge(vertex, fragment),
            (vertex, fragment) => {
                let mut result = ShaderMetadata::new(vertex_source, fragment_source);
                if let Err(e) = vertex {
                    result.set_stage_error(ShaderStage::Vertex, e.to_string());
                }
                if let Err(e) = fragment {
                    result.set_stage_error(ShaderStage::Fragment, e.to_string());
                }
                result
            }
        }
    }

    /// Static extraction, strict
    ///
    /// # Errors
    ///
    /// The first static analysis error (`MacroResolutionError`,
    /// `UnknownStructType`, `InvalidUiSpec`...).
    pub fn from_source_strict(vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata> {
        StaticExtractor::new().extract(vertex_source, fragment_source)
    }

    /// Reflection extraction through a live graphics context
    ///
    /// Compile and link failures are reported in the returned metadata.
    pub fn from_compilation<C: GraphicsContext>(
        context: &mut C,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderMetadata> {
        ReflectionAdapter::new(context).reflect(vertex_source, fragment_source)
    }

    /// Extract with any front-end
    pub fn extract<S: MetadataSource + ?Sized>(
        source: &mut S,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderMetadata> {
        source.extract(vertex_source, fragment_source)
    }

    // ===== LOGGER =====

    /// Set a custom logger
    ///
    /// Replaces the default logger with a custom implementation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shader_metadata::shader_meta::ShaderInfo;
    /// use shader_metadata::shader_meta::log::{Logger, LogEntry};
    ///
    /// struct Silent;
    ///
    /// impl Logger for Silent {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// ShaderInfo::set_logger(Silent);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like shader_debug!, shader_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the shader_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "shader_info_tests.rs"]
mod tests;
