/// Vertex + fragment metadata merging
///
/// Uniform, attribute and ui spec maps are unioned by name. A name present
/// in both stages keeps a single entry whose fields come from the fragment
/// stage (stage flags are the union). UI specs are merged key by key
/// independently of the uniforms.

use crate::metadata::{merge_ui_specs, ShaderMetadata, StageMetadata};

/// Combines the per-stage results of one extraction into a `ShaderMetadata`
pub struct MetadataMerger;

impl MetadataMerger {
    /// Merge vertex and fragment stage metadata
    ///
    /// Declaration order is the vertex order followed by names only the
    /// fragment stage declares.
    pub fn merge(vertex: StageMetadata, fragment: StageMetadata) -> ShaderMetadata {
        let mut result = ShaderMetadata::new(&vertex.source, &fragment.source);

        result.uniforms = vertex.uniforms;
        result.uniform_order = vertex.uniform_order;
        for name in fragment.uniform_order {
            let Some(info) = fragment.uniforms.get(&name) else {
                continue;
            };
            match result.uniforms.get_mut(&name) {
                Some(existing) => existing.merge_from(info),
                None => {
                    result.uniforms.insert(name.clone(), info.clone());
                    result.uniform_order.push(name);
                }
            }
        }

        result.attributes = vertex.attributes;
        result.attribute_order = vertex.attribute_order;
        for name in fragment.attribute_order {
            let Some(info) = fragment.attributes.get(&name) else {
                continue;
            };
            match result.attributes.get_mut(&name) {
                Some(existing) => existing.merge_from(info),
                None => {
                    result.attributes.insert(name.clone(), info.clone());
                    result.attribute_order.push(name);
                }
            }
        }

        result.uniform_ui_spec = vertex.ui_specs;
        for (name, spec) in fragment.ui_specs {
            match result.uniform_ui_spec.get_mut(&name) {
                Some(existing) => merge_ui_specs(existing, &spec),
                None => {
                    result.uniform_ui_spec.insert(name, spec);
                }
            }
        }

        result.uniform_count = result.uniforms.len() as u32;
        result.attribute_count = result.attributes.len() as u32;
        result
    }
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
