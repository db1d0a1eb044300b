//! TypeScript naming and type-spelling conventions.

use crate::model::{CodeModel, TypeRef};
use crate::paths::PathPolicy;
use crate::render::LanguageConventionService;

/// Reserved words that may not be used as identifiers in emitted TypeScript.
pub const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "package", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Suffix appended to identifiers that collide with a reserved word.
const ESCAPE_SUFFIX: &str = "Escaped";

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptConventions;

impl TypeScriptConventions {
    pub fn new() -> Self {
        Self
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED_WORDS.contains(&name)
    }

    /// The escaped spelling of a reserved identifier.
    pub fn escaped(name: &str) -> String {
        format!("{}{}", name, ESCAPE_SUFFIX)
    }

    fn primitive_name(name: &str) -> &str {
        match name {
            "string" => "string",
            "integer" | "int32" | "int64" | "float" | "double" | "number" => "number",
            "boolean" => "boolean",
            "void" => "void",
            "binary" => "ArrayBuffer",
            "date" | "datetime" => "Date",
            other => other,
        }
    }
}

impl LanguageConventionService for TypeScriptConventions {
    fn type_string(&self, model: &CodeModel, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named { name, declaration } => match declaration {
                Some(id) => self.escape_identifier(model.name(*id)),
                None => Self::primitive_name(name).to_string(),
            },
            TypeRef::Union(union) => {
                if union.members().is_empty() {
                    return "never".to_string();
                }
                union
                    .members()
                    .iter()
                    .map(|m| self.type_string(model, m))
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
        }
    }

    fn escape_identifier(&self, name: &str) -> String {
        if Self::is_reserved(name) {
            Self::escaped(name)
        } else {
            name.to_string()
        }
    }
}

impl PathPolicy for TypeScriptConventions {
    /// Directory segments are all-lowercase.
    fn normalize_segment(&self, segment: &str) -> String {
        segment.to_ascii_lowercase()
    }

    /// File stems are lowerCamelCase: first character lowered, rest kept.
    fn normalize_file_name(&self, name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn file_suffix(&self) -> &str {
        ".ts"
    }

    fn barrel_file_stem(&self) -> &str {
        "index"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, UnionType};

    #[test]
    fn test_primitive_type_spelling() {
        let model = CodeModel::new("ApiSdk").unwrap();
        let conventions = TypeScriptConventions::new();
        assert_eq!(conventions.type_string(&model, &TypeRef::named("integer")), "number");
        assert_eq!(conventions.type_string(&model, &TypeRef::named("string")), "string");
        assert_eq!(conventions.type_string(&model, &TypeRef::void()), "void");
    }

    #[test]
    fn test_union_type_spelling() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let user = model
            .add_child(
                model.root(),
                "User",
                NodeKind::Class {
                    base: None,
                    implements: Vec::new(),
                },
            )
            .unwrap();
        let conventions = TypeScriptConventions::new();
        let union = TypeRef::Union(UnionType::new(vec![
            TypeRef::named("string"),
            TypeRef::to_declaration("User", user),
        ]));
        assert_eq!(conventions.type_string(&model, &union), "string | User");
    }

    #[test]
    fn test_reserved_identifier_is_escaped() {
        let conventions = TypeScriptConventions::new();
        assert_eq!(conventions.escape_identifier("class"), "classEscaped");
        assert_eq!(conventions.escape_identifier("user"), "user");
    }

    #[test]
    fn test_file_stem_is_lower_camel_case() {
        let conventions = TypeScriptConventions::new();
        assert_eq!(conventions.normalize_file_name("UserSettings"), "userSettings");
        assert_eq!(conventions.normalize_segment("Models"), "models");
    }
}
