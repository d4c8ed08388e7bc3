//! Logging for shader metadata extraction
//!
//! This module provides a small replaceable logging layer:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs
//!
//! The active logger is owned by [`ShaderInfo`](crate::shader_meta::ShaderInfo).

use chrono::{DateTime, Local};
use colored::*;
use std::time::SystemTime;

/// Logger trait for custom logging implementations
///
/// Implement this trait to route extraction diagnostics somewhere else
/// (an editor console, a file, a test buffer...).
///
/// # Example
///
/// ```no_run
/// use shader_metadata::shader_meta::log::{Logger, LogEntry};
///
/// struct EditorConsole;
///
/// impl Logger for EditorConsole {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the editor...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "shader_meta::defines", "shader_meta::gl")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose tracing (per-declaration scanning)
    Trace,

    /// Development information (macro retries, extraction summaries)
    Debug,

    /// Important informational messages
    Info,

    /// Recoverable problems (ui spec fallbacks, skipped declarations)
    Warn,

    /// Extraction failures (with file:line details)
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the default console format
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry into its console line (without colors)
    pub fn format_plain(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                entry.severity.label(),
                entry.source,
                entry.message,
                file,
                line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp,
                entry.severity.label(),
                entry.source,
                entry.message
            ),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            eprintln!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            eprintln!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_trace;
/// shader_trace!("shader_meta::scan", "Scanning line {}", 12);
/// ```
#[macro_export]
macro_rules! shader_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::shader_meta::ShaderInfo::log(
            $crate::shader_meta::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_debug;
/// shader_debug!("shader_meta::defines", "Resolved {} macros", 3);
/// ```
#[macro_export]
macro_rules! shader_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::shader_meta::ShaderInfo::log(
            $crate::shader_meta::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_info;
/// shader_info!("shader_meta::reflect", "Program linked");
/// ```
#[macro_export]
macro_rules! shader_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::shader_meta::ShaderInfo::log(
            $crate::shader_meta::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_warn;
/// shader_warn!("shader_meta::reflect", "Ignoring UI spec for '{}'", "uAlpha");
/// ```
#[macro_export]
macro_rules! shader_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::shader_meta::ShaderInfo::log(
            $crate::shader_meta::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```no_run
/// # use shader_metadata::shader_error;
/// shader_error!("shader_meta::reflect", "Link failed: {}", "undefined symbol");
/// ```
#[macro_export]
macro_rules! shader_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::shader_meta::ShaderInfo::log_detailed(
            $crate::shader_meta::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
