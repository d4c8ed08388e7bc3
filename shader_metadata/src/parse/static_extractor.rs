/// Static extraction path
///
/// Text analysis only, no graphics context:
///
/// ```text
/// CommentStripper -> DefineTable -> DeclarationScanner -> StructExpander
///                                                      -> UiSpecParser
/// ```
///
/// Failures are hard: a stage either yields complete metadata or an error,
/// never partial results.

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::metadata::{
    AttributeInfo, GlslType, MetadataMerger, ShaderMetadata, ShaderStage, StageMetadata,
};
use crate::metadata_source::MetadataSource;
use crate::parse::{
    CommentStripper, DeclarationKeyword, DeclarationScanner, DefineTable, RawDeclaration,
    StructExpander, StructTable, UiSpecParser,
};

const SOURCE: &str = "shader_meta::static";

/// Extracts shader metadata from source text
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    config: ExtractionConfig,
}

impl StaticExtractor {
    /// Extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the metadata of a single stage
    pub fn extract_stage(&self, stage: ShaderStage, source: &str) -> Result<StageMetadata> {
        let stripped = CommentStripper::strip(source);
        let defines = DefineTable::from_source(&stripped, self.config.max_define_passes)?;
        let text = if self.config.substitute_defines {
            defines.substitute(&stripped)
        } else {
            stripped
        };
        let structs = StructTable::parse_with_defines(&text, &defines);

        let mut metadata = StageMetadata::new(stage, source);

        for decl in DeclarationScanner::scan(&text, source, DeclarationKeyword::Uniform, None) {
            // Last declaration of a name wins, whatever shape the earlier one had
            metadata.remove_uniform_declaration(&decl.name);

            let is_struct = GlslType::from_token(&decl.type_token).is_none();
            if is_struct && !self.config.expand_structs {
                crate::shader_warn!(SOURCE,
                    "Skipping struct uniform {} {} (struct expansion disabled)",
                    decl.type_token, decl.name);
                continue;
            }

            let count = Self::array_count(&decl, &defines)?;
            for info in StructExpander::expand(&decl, count, &structs, stage)? {
                metadata.insert_uniform(info);
            }

            let spec = UiSpecParser::parse(&decl.trailing).map_err(|e| {
                Error::InvalidUiSpec {
                    declaration: decl.name.clone(),
                    reason: e.to_string(),
                }
                .logged(SOURCE)
            })?;
            if let Some(spec) = spec {
                metadata.insert_ui_spec(&decl.name, spec);
            }
        }

        for decl in DeclarationScanner::scan(&text, source, DeclarationKeyword::Attribute, None) {
            let ty = GlslType::from_token(&decl.type_token).ok_or_else(|| {
                Error::UnsupportedType {
                    declaration: decl.name.clone(),
                    type_name: decl.type_token.clone(),
                }
                .logged(SOURCE)
            })?;
            let mut info = AttributeInfo::new(&decl.name, ty, stage);
            info.count = Self::array_count(&decl, &defines)?;
            metadata.insert_attribute(info);
        }

        crate::shader_debug!(SOURCE, "{} stage: {} uniforms, {} attributes, {} ui specs",
            stage, metadata.uniforms.len(), metadata.attributes.len(), metadata.ui_specs.len());
        Ok(metadata)
    }

    /// Extract both stages and merge them
    pub fn extract(&self, vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata> {
        let vertex = self.extract_stage(ShaderStage::Vertex, vertex_source)?;
        let fragment = self.extract_stage(ShaderStage::Fragment, fragment_source)?;
        Ok(MetadataMerger::merge(vertex, fragment))
    }

    /// Evaluated array length of `decl`, 0 when it has no array suffix
    fn array_count(decl: &RawDeclaration, defines: &DefineTable) -> Result<u32> {
        let Some(size) = &decl.array_size else {
            return Ok(0);
        };
        let invalid = || {
            Error::InvalidArraySize {
                declaration: decl.name.clone(),
                size: size.clone(),
            }
            .logged(SOURCE)
        };
        let literal = defines.evaluate(size).map_err(|_| invalid())?;
        match literal.as_count() {
            Some(count) if count > 0 => Ok(count),
            _ => Err(invalid()),
        }
    }
}

impl MetadataSource for StaticExtractor {
    fn extract(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ShaderMetadata> {
        StaticExtractor::extract(self, vertex_source, fragment_source)
    }
}

#[cfg(test)]
#[path = "static_extractor_tests.rs"]
mod tests;
