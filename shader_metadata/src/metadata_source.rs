/// Extraction front-end trait
///
/// Implemented by `StaticExtractor` (source text only) and
/// `ReflectionAdapter` (live graphics context). Both produce a merged
/// `ShaderMetadata` for a vertex + fragment pair.

use crate::error::Result;
use crate::metadata::ShaderMetadata;

/// A way of extracting metadata from a shader pair
pub trait MetadataSource {
    /// Extract the merged metadata of a vertex + fragment pair
    fn extract(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata>;
}
