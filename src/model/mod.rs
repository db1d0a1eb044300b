//! The CodeDOM: a language-agnostic tree model of an API surface.
//!
//! The model is an arena of [`CodeNode`]s addressed by [`NodeId`] handles.
//! Parent/child edges are exclusive ownership and always form a tree;
//! inheritance, type, and using references are plain `NodeId` lookups that
//! structural traversal never follows, so walks cannot recurse through the
//! inheritance DAG.
//!
//! ## Pipeline
//!
//! ```text
//! API description → CodeModel → Refiner(s) → ordered render → source files
//! ```
//!
//! The tree is built once per generation run, mutated in place by refiners,
//! then treated as read-only by the renderer.

pub mod element;
pub mod types;

pub use element::{CodeNode, MethodKind, NodeKind, ParameterKind, PropertyKind};
pub use types::{TypeRef, UnionType};

use rustc_hash::FxHashSet;

use crate::errors::{GenError, Result};

/// Handle to a node in the [`CodeModel`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The model tree for one generation run.
#[derive(Debug, Clone)]
pub struct CodeModel {
    nodes: Vec<CodeNode>,
    root: NodeId,
}

impl CodeModel {
    /// Create a model with a single root namespace.
    ///
    /// `root_name` is the dotted name every nested namespace extends
    /// (for example, a client namespace like `ApiSdk`).
    pub fn new(root_name: impl Into<String>) -> Result<Self> {
        let name = root_name.into();
        if name.is_empty() {
            return Err(GenError::invalid_argument("root namespace name is required"));
        }
        let root = CodeNode {
            name,
            parent: None,
            order: 0,
            children: Vec::new(),
            kind: NodeKind::Namespace,
        };
        Ok(Self {
            nodes: vec![root],
            root: NodeId(0),
        })
    }

    /// The root namespace.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node. Handles are only minted by this arena, so lookups
    /// cannot miss.
    pub fn node(&self, id: NodeId) -> &CodeNode {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut CodeNode {
        &mut self.nodes[id.index()]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    // ========================================================================
    // Tree mutation
    // ========================================================================

    /// Attach a new child to `parent`, validating the ownership table.
    ///
    /// The child's `order` is its insertion index among the parent's current
    /// children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId> {
        let name = name.into();
        if name.is_empty() {
            return Err(GenError::invalid_argument("element name is required"));
        }
        let parent_kind = self.node(parent).kind();
        if !parent_kind.can_own(&kind) {
            return Err(GenError::structural(format!(
                "a {} cannot own a {} (`{}`)",
                parent_kind.label(),
                kind.label(),
                name
            )));
        }
        let order = self.node(parent).children.len() as u32;
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(CodeNode {
            name,
            parent: Some(parent),
            order,
            children: Vec::new(),
            kind,
        });
        self.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Detach `child` from `parent`. The node stays in the arena (handles
    /// remain valid) but no longer participates in structural walks.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let pos = self.node(parent).children.iter().position(|&c| c == child);
        let Some(pos) = pos else {
            return Err(GenError::invalid_argument(format!(
                "`{}` is not a child of `{}`",
                self.name(child),
                self.name(parent)
            )));
        };
        self.node_mut(parent).children.remove(pos);
        self.node_mut(child).parent = None;
        Ok(())
    }

    /// Rename an element in place, preserving its authored case.
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(GenError::invalid_argument("element name is required"));
        }
        self.node_mut(id).name = name;
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find a direct child by exact name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.name(c) == name)
    }

    /// Walk a dotted namespace path below the root, creating missing
    /// segments. Each namespace node carries its full dotted name.
    pub fn ensure_namespace(&mut self, dotted: &str) -> Result<NodeId> {
        if dotted.is_empty() {
            return Err(GenError::invalid_argument("namespace name is required"));
        }
        let mut current = self.root;
        let mut qualified = self.name(self.root).to_string();
        for segment in dotted.split('.') {
            if segment.is_empty() {
                return Err(GenError::invalid_argument(format!(
                    "namespace `{}` has an empty segment",
                    dotted
                )));
            }
            qualified = format!("{}.{}", qualified, segment);
            let existing = self.children(current).iter().copied().find(|&c| {
                matches!(self.kind(c), NodeKind::Namespace) && self.node(c).simple_name() == segment
            });
            current = match existing {
                Some(id) => id,
                None => self.add_child(current, qualified.clone(), NodeKind::Namespace)?,
            };
        }
        Ok(current)
    }

    /// Find an existing namespace by its dotted path below the root.
    pub fn find_namespace(&self, dotted: &str) -> Option<NodeId> {
        let mut current = self.root;
        for segment in dotted.split('.') {
            current = self.children(current).iter().copied().find(|&c| {
                matches!(self.kind(c), NodeKind::Namespace) && self.node(c).simple_name() == segment
            })?;
        }
        Some(current)
    }

    /// Iterate ancestors of `id`, nearest first (excludes `id` itself).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// The nearest enclosing declaration block (class, interface, enum,
    /// function), starting at `id` itself.
    pub fn owning_declaration(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.kind(n).is_type_declaration() || matches!(self.kind(n), NodeKind::Function { .. }))
    }

    /// The nearest enclosing namespace, starting at `id` itself.
    pub fn owning_namespace(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| matches!(self.kind(n), NodeKind::Namespace))
    }

    /// Depth-first pre-order walk of the subtree rooted at `start`,
    /// following ownership edges only.
    pub fn descendants(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![start];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            // Reverse so children pop in insertion order.
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    // ========================================================================
    // Inheritance references
    // ========================================================================

    /// Set the base class of `class`, rejecting edges that would close a
    /// cycle through the inheritance DAG.
    pub fn set_base(&mut self, class: NodeId, base: NodeId) -> Result<()> {
        if self.reachable_by_inheritance(base)?.contains(&class) {
            return Err(GenError::structural(format!(
                "inheritance cycle: `{}` cannot derive from `{}`",
                self.name(class),
                self.name(base)
            )));
        }
        match &mut self.node_mut(class).kind {
            NodeKind::Class { base: slot, .. } => {
                *slot = Some(base);
                Ok(())
            }
            other => Err(GenError::structural(format!(
                "cannot set a base class on a {}",
                other.label()
            ))),
        }
    }

    /// Record that `class` implements `interface` (or that an interface
    /// extends another), with the same cycle check as [`set_base`](Self::set_base).
    pub fn add_implements(&mut self, class: NodeId, interface: NodeId) -> Result<()> {
        if self.reachable_by_inheritance(interface)?.contains(&class) {
            return Err(GenError::structural(format!(
                "inheritance cycle: `{}` cannot implement `{}`",
                self.name(class),
                self.name(interface)
            )));
        }
        match &mut self.node_mut(class).kind {
            NodeKind::Class { implements, .. } => {
                implements.push(interface);
                Ok(())
            }
            NodeKind::Interface { extends } => {
                extends.push(interface);
                Ok(())
            }
            other => Err(GenError::structural(format!(
                "cannot add an implemented interface to a {}",
                other.label()
            ))),
        }
    }

    /// The base class of `class`, if declared.
    pub fn base_class(&self, class: NodeId) -> Option<NodeId> {
        match self.kind(class) {
            NodeKind::Class { base, .. } => *base,
            _ => None,
        }
    }

    /// Interfaces implemented by a class or extended by an interface.
    pub fn implemented_interfaces(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            NodeKind::Class { implements, .. } => implements,
            NodeKind::Interface { extends } => extends,
            _ => &[],
        }
    }

    /// The base-class chain of `class`, root ancestor first, ending with
    /// `class` itself. A cyclic chain is a structural error, never a hang.
    pub fn inheritance_chain(&self, class: NodeId) -> Result<Vec<NodeId>> {
        let mut chain = vec![class];
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        seen.insert(class);
        let mut current = class;
        while let Some(base) = self.base_class(current) {
            if !seen.insert(base) {
                return Err(GenError::structural(format!(
                    "inheritance cycle through `{}`",
                    self.name(base)
                )));
            }
            chain.push(base);
            current = base;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Number of ancestors above `class` in its base-class chain.
    pub fn inheritance_depth(&self, class: NodeId) -> Result<usize> {
        Ok(self.inheritance_chain(class)?.len() - 1)
    }

    /// All declarations reachable from `start` over inheritance edges
    /// (base class plus implemented/extended interfaces), including `start`.
    fn reachable_by_inheritance(&self, start: NodeId) -> Result<FxHashSet<NodeId>> {
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            if let Some(base) = self.base_class(next) {
                stack.push(base);
            }
            stack.extend(self.implemented_interfaces(next).iter().copied());
        }
        Ok(seen)
    }

    // ========================================================================
    // File grouping
    // ========================================================================

    /// Record `declaration` as bundled into the file-grouping node `file`.
    /// The declaration stays owned by its namespace. An edge that would close
    /// a cycle through bundle references is rejected.
    pub fn bundle_into_file(&mut self, file: NodeId, declaration: NodeId) -> Result<()> {
        if self.reachable_by_bundling(declaration).contains(&file) {
            return Err(GenError::structural(format!(
                "bundle cycle: `{}` cannot be bundled into `{}`",
                self.name(declaration),
                self.name(file)
            )));
        }
        match &mut self.node_mut(file).kind {
            NodeKind::File { bundled } => {
                if !bundled.contains(&declaration) {
                    bundled.push(declaration);
                }
                Ok(())
            }
            other => Err(GenError::structural(format!(
                "cannot bundle declarations into a {}",
                other.label()
            ))),
        }
    }

    /// All nodes reachable from `start` over bundle references, including
    /// `start` itself.
    fn reachable_by_bundling(&self, start: NodeId) -> FxHashSet<NodeId> {
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            if let NodeKind::File { bundled } = self.kind(next) {
                stack.extend(bundled.iter().copied());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_kind() -> NodeKind {
        NodeKind::Class {
            base: None,
            implements: Vec::new(),
        }
    }

    #[test]
    fn test_ensure_namespace_builds_dotted_chain() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let graph = model.ensure_namespace("Models.Graph").unwrap();
        assert_eq!(model.name(graph), "ApiSdk.Models.Graph");
        assert_eq!(model.node(graph).simple_name(), "Graph");

        // Re-ensuring returns the same node.
        let again = model.ensure_namespace("Models.Graph").unwrap();
        assert_eq!(graph, again);

        let models = model.find_namespace("Models").unwrap();
        assert_eq!(model.parent(graph), Some(models));
        assert!(model.find_namespace("Models.Missing").is_none());
    }

    #[test]
    fn test_add_child_assigns_insertion_order() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let a = model.add_child(ns, "A", class_kind()).unwrap();
        let b = model.add_child(ns, "B", class_kind()).unwrap();
        assert_eq!(model.node(a).order(), 0);
        assert_eq!(model.node(b).order(), 1);
        assert_eq!(model.children(ns), &[a, b]);
    }

    #[test]
    fn test_add_child_rejects_illegal_ownership() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let err = model
            .add_child(
                ns,
                "orphan",
                NodeKind::Property {
                    kind: PropertyKind::Custom,
                    ty: TypeRef::named("string"),
                },
            )
            .unwrap_err();
        assert!(matches!(err, GenError::StructuralInconsistency(_)));
    }

    #[test]
    fn test_remove_child_detaches_node() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let a = model.add_child(ns, "A", class_kind()).unwrap();
        model.remove_child(ns, a).unwrap();
        assert!(model.children(ns).is_empty());
        assert_eq!(model.parent(a), None);
        assert!(model.remove_child(ns, a).is_err());
    }

    #[test]
    fn test_inheritance_chain_is_root_first() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let a = model.add_child(ns, "A", class_kind()).unwrap();
        let b = model.add_child(ns, "B", class_kind()).unwrap();
        let c = model.add_child(ns, "C", class_kind()).unwrap();
        model.set_base(b, a).unwrap();
        model.set_base(c, b).unwrap();

        assert_eq!(model.inheritance_chain(c).unwrap(), vec![a, b, c]);
        assert_eq!(model.inheritance_depth(c).unwrap(), 2);
        assert_eq!(model.inheritance_depth(a).unwrap(), 0);
    }

    #[test]
    fn test_set_base_rejects_cycles() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let a = model.add_child(ns, "A", class_kind()).unwrap();
        let b = model.add_child(ns, "B", class_kind()).unwrap();
        model.set_base(b, a).unwrap();
        let err = model.set_base(a, b).unwrap_err();
        assert!(matches!(err, GenError::StructuralInconsistency(_)));
        // Self-inheritance is also a cycle.
        assert!(model.set_base(a, a).is_err());
    }

    #[test]
    fn test_descendants_walks_ownership_only() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let a = model.add_child(ns, "A", class_kind()).unwrap();
        let b = model.add_child(ns, "B", class_kind()).unwrap();
        // Cross reference: B derives from A. Must not affect the walk.
        model.set_base(b, a).unwrap();
        let prop = model
            .add_child(
                a,
                "id",
                NodeKind::Property {
                    kind: PropertyKind::Custom,
                    ty: TypeRef::named("string"),
                },
            )
            .unwrap();

        let visited: Vec<NodeId> = model.descendants(ns).collect();
        assert_eq!(visited, vec![ns, a, prop, b]);
    }

    #[test]
    fn test_bundle_into_file_rejects_cycles() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let file_a = model
            .add_child(ns, "Shared", NodeKind::File { bundled: Vec::new() })
            .unwrap();
        let file_b = model
            .add_child(ns, "Extras", NodeKind::File { bundled: Vec::new() })
            .unwrap();
        let class = model.add_child(ns, "User", class_kind()).unwrap();

        model.bundle_into_file(file_a, class).unwrap();
        // Self-bundling is a cycle.
        let err = model.bundle_into_file(file_a, file_a).unwrap_err();
        assert!(matches!(err, GenError::StructuralInconsistency(_)));
        // Two files bundling each other is too.
        model.bundle_into_file(file_a, file_b).unwrap();
        let err = model.bundle_into_file(file_b, file_a).unwrap_err();
        assert!(matches!(err, GenError::StructuralInconsistency(_)));
    }

    #[test]
    fn test_owning_declaration_walks_up() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let class = model.add_child(ns, "User", class_kind()).unwrap();
        let method = model
            .add_child(
                class,
                "fetch",
                NodeKind::Method {
                    kind: MethodKind::Custom,
                    return_type: TypeRef::void(),
                },
            )
            .unwrap();
        let param = model
            .add_child(
                method,
                "id",
                NodeKind::Parameter {
                    kind: ParameterKind::Custom,
                    ty: TypeRef::named("string"),
                    optional: false,
                },
            )
            .unwrap();

        assert_eq!(model.owning_declaration(param), Some(class));
        assert_eq!(model.owning_declaration(class), Some(class));
        assert_eq!(model.owning_namespace(param), Some(ns));
    }
}
