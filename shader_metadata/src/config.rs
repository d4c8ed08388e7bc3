/// Extraction configuration for the static path

/// Static extraction settings
///
/// # Example
///
/// ```no_run
/// use shader_metadata::shader_meta::{ExtractionConfig, StaticExtractor};
///
/// let extractor = StaticExtractor::with_config(ExtractionConfig {
///     expand_structs: false,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Upper bound of macro resolution passes
    pub max_define_passes: usize,
    /// Substitute resolved macros into the source before scanning declarations
    pub substitute_defines: bool,
    /// Expand struct-typed uniforms; when false they are skipped with a warning
    pub expand_structs: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_define_passes: 64,
            substitute_defines: true,
            expand_structs: true,
        }
    }
}
