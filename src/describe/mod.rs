//! Building a CodeModel from a structured API description.
//!
//! The pipeline itself never parses an API description format; this module
//! is the external model-builder seam made concrete: a small JSON shape
//! (namespaces → declarations → members, inheritance by name) deserialized
//! with serde and lowered into a [`CodeModel`].
//!
//! Lowering runs in two phases so by-name references can resolve:
//!
//! 1. Create every namespace and type declaration.
//! 2. Add members (with resolved type references) and wire up inheritance,
//!    rejecting unknown names and cycles.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{GenError, Result};
use crate::model::{
    CodeModel, MethodKind, NodeId, NodeKind, ParameterKind, PropertyKind, TypeRef, UnionType,
};

/// Root of the JSON description document.
#[derive(Debug, Deserialize)]
pub struct ApiDescription {
    /// Root namespace name for the generated client.
    pub name: String,
    #[serde(default)]
    pub namespaces: Vec<NamespaceDescription>,
}

#[derive(Debug, Deserialize)]
pub struct NamespaceDescription {
    /// Dotted path below the root namespace.
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassDescription>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDescription>,
    #[serde(default)]
    pub enums: Vec<EnumDescription>,
    #[serde(default)]
    pub functions: Vec<FunctionDescription>,
}

#[derive(Debug, Deserialize)]
pub struct ClassDescription {
    pub name: String,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDescription>,
    #[serde(default)]
    pub methods: Vec<MethodDescription>,
}

#[derive(Debug, Deserialize)]
pub struct InterfaceDescription {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDescription>,
    #[serde(default)]
    pub methods: Vec<MethodDescription>,
}

#[derive(Debug, Deserialize)]
pub struct EnumDescription {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FunctionDescription {
    pub name: String,
    #[serde(default = "default_type")]
    pub returns: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescription>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyDescription {
    pub name: String,
    #[serde(rename = "type", default = "default_type")]
    pub ty: String,
}

#[derive(Debug, Deserialize)]
pub struct MethodDescription {
    pub name: String,
    #[serde(default)]
    pub kind: MethodKindDescription,
    #[serde(default = "default_type")]
    pub returns: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescription>,
}

#[derive(Debug, Deserialize)]
pub struct ParameterDescription {
    pub name: String,
    #[serde(rename = "type", default = "default_type")]
    pub ty: String,
    #[serde(default)]
    pub kind: ParameterKindDescription,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKindDescription {
    Constructor,
    RequestBuilder,
    #[default]
    Custom,
}

impl From<MethodKindDescription> for MethodKind {
    fn from(kind: MethodKindDescription) -> Self {
        match kind {
            MethodKindDescription::Constructor => MethodKind::Constructor,
            MethodKindDescription::RequestBuilder => MethodKind::RequestBuilder,
            MethodKindDescription::Custom => MethodKind::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKindDescription {
    #[default]
    Custom,
    RequestBody,
    RequestConfiguration,
    Cancellation,
}

impl From<ParameterKindDescription> for ParameterKind {
    fn from(kind: ParameterKindDescription) -> Self {
        match kind {
            ParameterKindDescription::Custom => ParameterKind::Custom,
            ParameterKindDescription::RequestBody => ParameterKind::RequestBody,
            ParameterKindDescription::RequestConfiguration => ParameterKind::RequestConfiguration,
            ParameterKindDescription::Cancellation => ParameterKind::Cancellation,
        }
    }
}

fn default_type() -> String {
    "void".to_string()
}

/// Read and deserialize a description document from disk.
pub fn load_description(path: &Path) -> Result<ApiDescription> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Lower a description into a model tree.
pub fn build_model(description: &ApiDescription) -> Result<CodeModel> {
    let mut model = CodeModel::new(description.name.as_str())?;

    // Phase 1: namespaces and type declarations, so names can resolve.
    for nsd in &description.namespaces {
        let ns = model.ensure_namespace(&nsd.name)?;
        for class in &nsd.classes {
            model.add_child(
                ns,
                class.name.as_str(),
                NodeKind::Class {
                    base: None,
                    implements: Vec::new(),
                },
            )?;
        }
        for interface in &nsd.interfaces {
            model.add_child(
                ns,
                interface.name.as_str(),
                NodeKind::Interface { extends: Vec::new() },
            )?;
        }
        for decl in &nsd.enums {
            let id = model.add_child(ns, decl.name.as_str(), NodeKind::Enum)?;
            for member in &decl.members {
                model.add_child(id, member.as_str(), NodeKind::EnumMember)?;
            }
        }
    }

    // Phase 2: members, functions, and inheritance references.
    for nsd in &description.namespaces {
        let ns = model
            .find_namespace(&nsd.name)
            .ok_or_else(|| GenError::invalid_argument(format!("unknown namespace `{}`", nsd.name)))?;
        for class in &nsd.classes {
            let id = model.find_child(ns, &class.name).ok_or_else(|| {
                GenError::invalid_argument(format!("unknown class `{}`", class.name))
            })?;
            if let Some(base) = &class.base {
                let base_id = resolve_declaration(&model, ns, base)?;
                model.set_base(id, base_id)?;
            }
            for interface in &class.implements {
                let interface_id = resolve_declaration(&model, ns, interface)?;
                model.add_implements(id, interface_id)?;
            }
            add_members(&mut model, ns, id, &class.properties, &class.methods)?;
        }
        for interface in &nsd.interfaces {
            let id = model.find_child(ns, &interface.name).ok_or_else(|| {
                GenError::invalid_argument(format!("unknown interface `{}`", interface.name))
            })?;
            for extended in &interface.extends {
                let extended_id = resolve_declaration(&model, ns, extended)?;
                model.add_implements(id, extended_id)?;
            }
            add_members(&mut model, ns, id, &interface.properties, &interface.methods)?;
        }
        for function in &nsd.functions {
            let returns = resolve_type(&model, ns, &function.returns);
            let id = model.add_child(
                ns,
                function.name.as_str(),
                NodeKind::Function {
                    return_type: returns,
                },
            )?;
            add_parameters(&mut model, ns, id, &function.parameters)?;
        }
    }

    Ok(model)
}

fn add_members(
    model: &mut CodeModel,
    ns: NodeId,
    declaration: NodeId,
    properties: &[PropertyDescription],
    methods: &[MethodDescription],
) -> Result<()> {
    for property in properties {
        let ty = resolve_type(model, ns, &property.ty);
        model.add_child(
            declaration,
            property.name.as_str(),
            NodeKind::Property {
                kind: PropertyKind::Custom,
                ty,
            },
        )?;
    }
    for method in methods {
        let return_type = resolve_type(model, ns, &method.returns);
        let id = model.add_child(
            declaration,
            method.name.as_str(),
            NodeKind::Method {
                kind: method.kind.into(),
                return_type,
            },
        )?;
        add_parameters(model, ns, id, &method.parameters)?;
    }
    Ok(())
}

fn add_parameters(
    model: &mut CodeModel,
    ns: NodeId,
    callable: NodeId,
    parameters: &[ParameterDescription],
) -> Result<()> {
    for parameter in parameters {
        let ty = resolve_type(model, ns, &parameter.ty);
        model.add_child(
            callable,
            parameter.name.as_str(),
            NodeKind::Parameter {
                kind: parameter.kind.into(),
                ty,
                optional: parameter.optional,
            },
        )?;
    }
    Ok(())
}

/// Resolve a type spelling: `A|B` unions, known declarations, or a bare
/// primitive/external name.
fn resolve_type(model: &CodeModel, ns: NodeId, spelling: &str) -> TypeRef {
    if spelling.contains('|') {
        let members = spelling
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| resolve_type(model, ns, s))
            .collect();
        return TypeRef::Union(UnionType::new(members));
    }
    match resolve_declaration(model, ns, spelling) {
        Ok(id) => TypeRef::to_declaration(spelling, id),
        Err(_) => TypeRef::named(spelling),
    }
}

/// Resolve a declaration by name: `Ns.Path.Name` qualified, or a simple
/// name searched in the current namespace first, then across the tree.
fn resolve_declaration(model: &CodeModel, current: NodeId, name: &str) -> Result<NodeId> {
    if let Some((namespace, simple)) = name.rsplit_once('.') {
        return model
            .find_namespace(namespace)
            .and_then(|ns| model.find_child(ns, simple))
            .filter(|&id| model.kind(id).is_type_declaration())
            .ok_or_else(|| GenError::invalid_argument(format!("unknown type `{}`", name)));
    }
    if let Some(id) = model
        .find_child(current, name)
        .filter(|&id| model.kind(id).is_type_declaration())
    {
        return Ok(id);
    }
    model
        .descendants(model.root())
        .find(|&id| model.kind(id).is_type_declaration() && model.name(id) == name)
        .ok_or_else(|| GenError::invalid_argument(format!("unknown type `{}`", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ApiDescription {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_build_model_resolves_inheritance_by_name() {
        let description = parse(
            r#"{
                "name": "ApiSdk",
                "namespaces": [
                    {
                        "name": "Models",
                        "classes": [
                            {"name": "Entity"},
                            {"name": "User", "base": "Entity"}
                        ],
                        "interfaces": [{"name": "Parsable"}]
                    }
                ]
            }"#,
        );
        let model = build_model(&description).unwrap();
        let ns = model.find_namespace("Models").unwrap();
        let entity = model.find_child(ns, "Entity").unwrap();
        let user = model.find_child(ns, "User").unwrap();
        assert_eq!(model.base_class(user), Some(entity));
        assert_eq!(model.inheritance_chain(user).unwrap(), vec![entity, user]);
    }

    #[test]
    fn test_build_model_rejects_inheritance_cycles() {
        let description = parse(
            r#"{
                "name": "ApiSdk",
                "namespaces": [
                    {
                        "name": "Models",
                        "classes": [
                            {"name": "A", "base": "B"},
                            {"name": "B", "base": "A"}
                        ]
                    }
                ]
            }"#,
        );
        let err = build_model(&description).unwrap_err();
        assert!(matches!(err, GenError::StructuralInconsistency(_)));
    }

    #[test]
    fn test_member_types_resolve_to_declarations() {
        let description = parse(
            r#"{
                "name": "ApiSdk",
                "namespaces": [
                    {
                        "name": "Models",
                        "classes": [
                            {"name": "Address"},
                            {
                                "name": "User",
                                "properties": [
                                    {"name": "home", "type": "Address"},
                                    {"name": "nickname", "type": "string"},
                                    {"name": "contact", "type": "string|Address"}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        );
        let model = build_model(&description).unwrap();
        let ns = model.find_namespace("Models").unwrap();
        let address = model.find_child(ns, "Address").unwrap();
        let user = model.find_child(ns, "User").unwrap();

        let home = model.find_child(user, "home").unwrap();
        match model.kind(home) {
            NodeKind::Property { ty, .. } => assert_eq!(ty.declaration(), Some(address)),
            other => panic!("expected property, got {}", other.label()),
        }
        let contact = model.find_child(user, "contact").unwrap();
        match model.kind(contact) {
            NodeKind::Property {
                ty: TypeRef::Union(union),
                ..
            } => {
                assert_eq!(union.members().len(), 2);
                assert_eq!(union.first_applicable().and_then(TypeRef::declaration), Some(address));
            }
            other => panic!("expected union property, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_base_is_invalid_argument() {
        let description = parse(
            r#"{
                "name": "ApiSdk",
                "namespaces": [
                    {"name": "Models", "classes": [{"name": "User", "base": "Ghost"}]}
                ]
            }"#,
        );
        let err = build_model(&description).unwrap_err();
        assert!(matches!(err, GenError::InvalidArgument(_)));
    }

    #[test]
    fn test_method_kinds_deserialize_kebab_case() {
        let description = parse(
            r#"{
                "name": "ApiSdk",
                "namespaces": [
                    {
                        "name": "Builders",
                        "classes": [
                            {
                                "name": "UsersRequestBuilder",
                                "methods": [
                                    {"name": "constructor", "kind": "constructor"},
                                    {"name": "byId", "kind": "request-builder", "returns": "string"}
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        );
        let model = build_model(&description).unwrap();
        let ns = model.find_namespace("Builders").unwrap();
        let builder = model.find_child(ns, "UsersRequestBuilder").unwrap();
        let by_id = model.find_child(builder, "byId").unwrap();
        assert!(matches!(
            model.kind(by_id),
            NodeKind::Method {
                kind: MethodKind::RequestBuilder,
                ..
            }
        ));
    }
}
