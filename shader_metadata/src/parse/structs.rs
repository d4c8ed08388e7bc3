/// Struct definitions and struct-typed uniform expansion
///
/// A uniform whose type token is not a base type names a struct:
///
/// ```glsl
/// struct Light { vec3 position; vec4 color; };
/// uniform Light uLights[2];
/// ```
///
/// expands to one entry per field and array index, in field declaration
/// order: `uLights[0].position`, `uLights[0].color`, `uLights[1].position`,
/// `uLights[1].color`. Only single-level structs are supported, every field
/// must have a base type. Field array sizes may be macro expressions
/// (`float weights[N * 2];`). A field that cannot be read makes every
/// uniform of that struct type fail to expand.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::metadata::{GlslType, ShaderStage, UniformInfo, UniformKind};
use crate::parse::{DefineTable, RawDeclaration};

const SOURCE: &str = "shader_meta::structs";

/// One struct field
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Field type token
    pub type_token: String,
    pub name: String,
    /// Field array length (`float weights[4];`)
    pub array_size: Option<u32>,
}

/// A `struct <Type> { ... }` definition
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub type_name: String,
    /// Fields in declaration order
    pub fields: Vec<StructField>,
    /// Problems found in the body, raised when the struct is expanded
    pub errors: Vec<Error>,
}

fn struct_regex() -> &'static Regex {
    static STRUCT: OnceLock<Regex> = OnceLock::new();
    STRUCT.get_or_init(|| {
        Regex::new(r"\bstruct\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{([^}]*)\}")
            .expect("struct regex is valid")
    })
}

fn field_regex() -> &'static Regex {
    static FIELD: OnceLock<Regex> = OnceLock::new();
    FIELD.get_or_init(|| {
        Regex::new(r"^(?:(?:lowp|mediump|highp)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s+(.+)$")
            .expect("struct field regex is valid")
    })
}

fn declarator_regex() -> &'static Regex {
    static DECLARATOR: OnceLock<Regex> = OnceLock::new();
    DECLARATOR.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:\[([^\]]*)\])?$")
            .expect("struct declarator regex is valid")
    })
}

/// Struct definitions of one shader stage, by type name
#[derive(Debug, Clone, Default)]
pub struct StructTable {
    defs: FxHashMap<String, StructDef>,
}

impl StructTable {
    /// Collect struct definitions from comment-free source with no macros
    pub fn parse(source: &str) -> StructTable {
        Self::parse_with_defines(source, &DefineTable::default())
    }

    /// Collect struct definitions, evaluating field array sizes with `defines`
    ///
    /// A later definition with the same type name replaces an earlier one.
    pub fn parse_with_defines(source: &str, defines: &DefineTable) -> StructTable {
        let mut defs = FxHashMap::default();

        for caps in struct_regex().captures_iter(source) {
            let type_name = caps[1].to_string();
            let mut def = StructDef {
                type_name: type_name.clone(),
                fields: Vec::new(),
                errors: Vec::new(),
            };

            for statement in caps[2].split(';') {
                let statement = statement.split_whitespace().collect::<Vec<_>>().join(" ");
                if statement.is_empty() {
                    continue;
                }
                let Some(field) = field_regex().captures(&statement) else {
                    def.errors.push(unreadable_field(&type_name, &statement));
                    continue;
                };
                for declarator in field[2].split(',') {
                    let declarator = declarator.trim();
                    let Some(decl) = declarator_regex().captures(declarator) else {
                        def.errors.push(unreadable_field(&type_name, declarator));
                        continue;
                    };
                    let name = decl[1].to_string();
                    let array_size = match decl.get(2) {
                        Some(size) => match field_array_size(size.as_str(), defines) {
                            Some(len) => Some(len),
                            None => {
                                def.errors.push(Error::InvalidArraySize {
                                    declaration: format!("{}.{}", type_name, name),
                                    size: size.as_str().trim().to_string(),
                                });
                                continue;
                            }
                        },
                        None => None,
                    };
                    def.fields.push(StructField {
                        type_token: field[1].to_string(),
                        name,
                        array_size,
                    });
                }
            }

            defs.insert(type_name, def);
        }

        StructTable { defs }
    }

    pub fn get(&self, type_name: &str) -> Option<&StructDef> {
        self.defs.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn unreadable_field(type_name: &str, text: &str) -> Error {
    Error::UnsupportedType {
        declaration: type_name.to_string(),
        type_name: format!("field '{}'", text),
    }
}

/// Evaluated length of a field array, `None` unless a positive integer
fn field_array_size(size: &str, defines: &DefineTable) -> Option<u32> {
    defines
        .evaluate(size)
        .ok()
        .and_then(|literal| literal.as_count())
        .filter(|&len| len > 0)
}

/// Turns a declaration into uniform entries
pub struct StructExpander;

impl StructExpander {
    /// Expand `decl` (with evaluated array length `count`, 0 if not arrayed)
    ///
    /// Base types give one entry, or `count` entries `name[i]`. Struct types
    /// give one entry per field (per array index when arrayed); a struct
    /// field that is itself an array gives one entry per element.
    pub fn expand(
        decl: &RawDeclaration,
        count: u32,
        structs: &StructTable,
        stage: ShaderStage,
    ) -> Result<Vec<UniformInfo>> {
        if let Some(ty) = GlslType::from_token(&decl.type_token) {
            if count == 0 {
                return Ok(vec![UniformInfo::scalar(&decl.name, ty, stage)]);
            }
            return Ok((0..count)
                .map(|index| UniformInfo::array_element(&decl.name, ty, index, count, stage))
                .collect());
        }

        let def = structs.get(&decl.type_token).ok_or_else(|| {
            Error::UnknownStructType {
                type_name: decl.type_token.clone(),
                declaration: decl.name.clone(),
            }
            .logged(SOURCE)
        })?;

        if let Some(error) = def.errors.first() {
            return Err(error.clone().logged(SOURCE));
        }

        let mut field_types = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let ty = GlslType::from_token(&field.type_token).ok_or_else(|| {
                Error::UnsupportedType {
                    declaration: format!("{}.{}", decl.name, field.name),
                    type_name: field.type_token.clone(),
                }
                .logged(SOURCE)
            })?;
            field_types.push(ty);
        }

        let prefixes: Vec<(String, u32)> = if count == 0 {
            vec![(decl.name.clone(), 0)]
        } else {
            (0..count).map(|i| (format!("{}[{}]", decl.name, i), i)).collect()
        };

        let mut entries = Vec::new();
        for (prefix, index) in &prefixes {
            for (field, ty) in def.fields.iter().zip(&field_types) {
                let field_name = format!("{}.{}", prefix, field.name);
                let names = match field.array_size {
                    Some(len) => (0..len).map(|i| format!("{}[{}]", field_name, i)).collect(),
                    None => vec![field_name],
                };
                for name in names {
                    entries.push(UniformInfo {
                        name,
                        ty: *ty,
                        count,
                        index: *index,
                        kind: UniformKind::StructField {
                            struct_type: def.type_name.clone(),
                            struct_name: decl.name.clone(),
                        },
                        stages: stage.flag(),
                    });
                }
            }
        }

        crate::shader_trace!(SOURCE, "{} {} expanded to {} entries",
            decl.type_token, decl.name, entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
#[path = "structs_tests.rs"]
mod tests;
