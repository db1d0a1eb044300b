//! Type references carried by members.
//!
//! A [`TypeRef`] is a value, not a tree node: it names a type and optionally
//! points at the declaration the name resolves to. The pointer is a
//! non-owning arena handle and is never followed during structural walks.

use super::NodeId;

/// Reference to a type, either by bare name (primitives, unresolved names)
/// or resolved to a declaration in the model.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named {
        name: String,
        declaration: Option<NodeId>,
    },
    Union(UnionType),
}

impl TypeRef {
    /// A type known only by name (primitive or external).
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            declaration: None,
        }
    }

    /// A type resolved to a declaration in the model.
    pub fn to_declaration(name: impl Into<String>, declaration: NodeId) -> Self {
        TypeRef::Named {
            name: name.into(),
            declaration: Some(declaration),
        }
    }

    /// The neutral "no value" type; conventions spell it per language.
    pub fn void() -> Self {
        TypeRef::named("void")
    }

    /// The spelled name of this reference. For unions, the first applicable
    /// member's name.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } => name,
            TypeRef::Union(union) => union.first_applicable().map_or("", TypeRef::name),
        }
    }

    /// The declaration this reference resolves to, if any. For unions, the
    /// first applicable member's declaration.
    pub fn declaration(&self) -> Option<NodeId> {
        match self {
            TypeRef::Named { declaration, .. } => *declaration,
            TypeRef::Union(union) => union.first_applicable().and_then(TypeRef::declaration),
        }
    }
}

/// An ordered set of alternative type references.
///
/// Conventions that cannot express true unions pick one member through
/// [`first_applicable`](Self::first_applicable).
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    members: Vec<TypeRef>,
}

impl UnionType {
    pub fn new(members: Vec<TypeRef>) -> Self {
        Self { members }
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[TypeRef] {
        &self.members
    }

    /// First member that resolves to a declaration, falling back to the
    /// first member when none resolve.
    pub fn first_applicable(&self) -> Option<&TypeRef> {
        self.members
            .iter()
            .find(|m| m.declaration().is_some())
            .or_else(|| self.members.first())
    }
}
