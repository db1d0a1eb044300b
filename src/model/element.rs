//! Node definitions for the CodeDOM.
//!
//! Every element in the model is a [`CodeNode`] stored in the
//! [`CodeModel`](super::CodeModel) arena. Structure (parent/children) is
//! ownership; the `NodeId` fields inside [`NodeKind`] variants (base class,
//! implemented interfaces, bundled declarations, using targets) are
//! non-owning cross references and are never followed by structural walks.

use super::NodeId;
use super::types::TypeRef;

/// A single element of the model tree.
#[derive(Debug, Clone)]
pub struct CodeNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) order: u32,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl CodeNode {
    /// The element's name exactly as authored (case preserved).
    ///
    /// Namespaces carry their full dot-segmented name; use
    /// [`simple_name`](Self::simple_name) for the last segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last dot-segment of the name (the whole name for non-namespaces).
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Insertion index among siblings. Not necessarily the emission order;
    /// comparers decide that.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Owned children, in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The closed set of element kinds, with per-kind payload.
///
/// A closed enum (rather than open subclassing) lets comparers and writers
/// match exhaustively and keeps illegal cross-kind assumptions out of the
/// tree operations.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Container of declarations and nested namespaces. Exactly one root
    /// namespace exists per generation run.
    Namespace,
    /// Grouping node for languages that bundle several declarations into one
    /// physical file. Holds non-owning references to the declarations it
    /// bundles; they stay owned by their namespace.
    File { bundled: Vec<NodeId> },
    /// Class declaration. `base` and `implements` are non-owning references
    /// into the arena; together they must stay acyclic.
    Class {
        base: Option<NodeId>,
        implements: Vec<NodeId>,
    },
    /// Interface declaration.
    Interface { extends: Vec<NodeId> },
    /// Enum declaration; owns its members as children.
    Enum,
    /// A single enum member.
    EnumMember,
    /// Free function declared at namespace level; owns its parameters.
    Function { return_type: TypeRef },
    /// Method owned by a class or interface.
    Method {
        kind: MethodKind,
        return_type: TypeRef,
    },
    /// Property owned by a class or interface.
    Property { kind: PropertyKind, ty: TypeRef },
    /// Indexer owned by a class.
    Indexer {
        index_type: TypeRef,
        return_type: TypeRef,
    },
    /// Parameter owned by a method or function.
    Parameter {
        kind: ParameterKind,
        ty: TypeRef,
        optional: bool,
    },
    /// A recorded dependency on a symbol from another namespace, optionally
    /// resolved to the declaration it refers to.
    Using {
        source_namespace: String,
        declaration: Option<NodeId>,
        erasable: bool,
    },
}

impl NodeKind {
    /// Kinds that get their own output file in per-declaration mode.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Class { .. }
                | NodeKind::Interface { .. }
                | NodeKind::Enum
                | NodeKind::Function { .. }
                | NodeKind::File { .. }
        )
    }

    /// Kinds that introduce a type name (class, interface, enum).
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Class { .. } | NodeKind::Interface { .. } | NodeKind::Enum
        )
    }

    /// Short lowercase label for error messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Namespace => "namespace",
            NodeKind::File { .. } => "file",
            NodeKind::Class { .. } => "class",
            NodeKind::Interface { .. } => "interface",
            NodeKind::Enum => "enum",
            NodeKind::EnumMember => "enum member",
            NodeKind::Function { .. } => "function",
            NodeKind::Method { .. } => "method",
            NodeKind::Property { .. } => "property",
            NodeKind::Indexer { .. } => "indexer",
            NodeKind::Parameter { .. } => "parameter",
            NodeKind::Using { .. } => "using",
        }
    }

    /// Whether a node of this kind may own a child of `child` kind.
    ///
    /// Attaching a child to a parent kind outside this table is a
    /// structural-inconsistency error, not a silent no-op.
    pub fn can_own(&self, child: &NodeKind) -> bool {
        match self {
            NodeKind::Namespace => matches!(
                child,
                NodeKind::Namespace
                    | NodeKind::Class { .. }
                    | NodeKind::Interface { .. }
                    | NodeKind::Enum
                    | NodeKind::Function { .. }
                    | NodeKind::File { .. }
                    | NodeKind::Using { .. }
            ),
            NodeKind::File { .. } => matches!(child, NodeKind::Using { .. }),
            NodeKind::Class { .. } => matches!(
                child,
                NodeKind::Property { .. }
                    | NodeKind::Method { .. }
                    | NodeKind::Indexer { .. }
                    | NodeKind::Using { .. }
                    | NodeKind::Class { .. }
                    | NodeKind::Interface { .. }
                    | NodeKind::Enum
            ),
            NodeKind::Interface { .. } => matches!(
                child,
                NodeKind::Property { .. } | NodeKind::Method { .. } | NodeKind::Using { .. }
            ),
            NodeKind::Enum => matches!(child, NodeKind::EnumMember | NodeKind::Using { .. }),
            NodeKind::Function { .. } | NodeKind::Method { .. } => {
                matches!(child, NodeKind::Parameter { .. })
            }
            NodeKind::EnumMember
            | NodeKind::Property { .. }
            | NodeKind::Indexer { .. }
            | NodeKind::Parameter { .. }
            | NodeKind::Using { .. } => false,
        }
    }
}

/// Structural role of a method, used by ordering and refinement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Constructor,
    RequestBuilder,
    Custom,
}

/// Structural role of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Custom,
    RequestBuilder,
}

/// Structural role of a parameter, used by the parameter comparer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Custom,
    RequestBody,
    RequestConfiguration,
    Cancellation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_is_last_dot_segment() {
        let node = CodeNode {
            name: "Models.Graph.User".to_string(),
            parent: None,
            order: 0,
            children: Vec::new(),
            kind: NodeKind::Namespace,
        };
        assert_eq!(node.simple_name(), "User");
        assert_eq!(node.name(), "Models.Graph.User");
    }

    #[test]
    fn test_ownership_table() {
        let ns = NodeKind::Namespace;
        let class = NodeKind::Class {
            base: None,
            implements: Vec::new(),
        };
        let prop = NodeKind::Property {
            kind: PropertyKind::Custom,
            ty: TypeRef::named("string"),
        };
        assert!(ns.can_own(&class));
        assert!(class.can_own(&prop));
        assert!(!ns.can_own(&prop));
        assert!(!prop.can_own(&class));
    }
}
