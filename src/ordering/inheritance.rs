//! Inheritance-aware sequencing of sibling classes.
//!
//! When a language declares types in file order, a base class must be
//! declared before any class deriving from it. Classes are grouped by
//! inheritance-chain depth and emitted breadth-first: depth 0 (no base)
//! first, then depth 1, and so on. Within a level names sort ordinal,
//! case-insensitive, so reruns produce identical diffs.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::model::{CodeModel, NodeId, NodeKind};

/// Order the classes directly under `namespace` so that every base precedes
/// its derived classes.
///
/// Classes are de-duplicated by case-insensitive name: one already emitted
/// at a shallower depth is not repeated. A cyclic inheritance chain is a
/// structural-inconsistency error.
pub fn sort_classes_by_inheritance(model: &CodeModel, namespace: NodeId) -> Result<Vec<NodeId>> {
    let mut levels: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    for &child in model.children(namespace) {
        if matches!(model.kind(child), NodeKind::Class { .. }) {
            let depth = model.inheritance_depth(child)?;
            levels.entry(depth).or_default().push(child);
        }
    }

    let mut emitted: FxHashSet<String> = FxHashSet::default();
    let mut ordered = Vec::new();
    for (_, mut level) in levels {
        level.sort_by_key(|&c| model.name(c).to_ascii_lowercase());
        for class in level {
            if emitted.insert(model.name(class).to_ascii_lowercase()) {
                ordered.push(class);
            }
        }
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> NodeKind {
        NodeKind::Class {
            base: None,
            implements: Vec::new(),
        }
    }

    #[test]
    fn test_base_classes_come_first() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        // Insert in reverse so insertion order alone would be wrong.
        let c = model.add_child(ns, "C", class()).unwrap();
        let b = model.add_child(ns, "B", class()).unwrap();
        let a = model.add_child(ns, "A", class()).unwrap();
        model.set_base(b, a).unwrap();
        model.set_base(c, b).unwrap();

        let ordered = sort_classes_by_inheritance(&model, ns).unwrap();
        assert_eq!(ordered, vec![a, b, c]);
    }

    #[test]
    fn test_levels_sort_case_insensitively() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let zebra = model.add_child(ns, "zebra", class()).unwrap();
        let apple = model.add_child(ns, "Apple", class()).unwrap();
        let mango = model.add_child(ns, "Mango", class()).unwrap();

        let ordered = sort_classes_by_inheritance(&model, ns).unwrap();
        assert_eq!(ordered, vec![apple, mango, zebra]);
    }

    #[test]
    fn test_duplicate_names_emitted_once() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let base = model.add_child(ns, "Entity", class()).unwrap();
        // Same name at a deeper level; only the shallow one survives.
        let shadow = model.add_child(ns, "entity", class()).unwrap();
        let other = model.add_child(ns, "User", class()).unwrap();
        model.set_base(shadow, base).unwrap();
        model.set_base(other, base).unwrap();

        let ordered = sort_classes_by_inheritance(&model, ns).unwrap();
        assert_eq!(ordered, vec![base, other]);
    }

    #[test]
    fn test_interfaces_and_enums_are_ignored() {
        let mut model = CodeModel::new("ApiSdk").unwrap();
        let ns = model.root();
        let user = model.add_child(ns, "User", class()).unwrap();
        model
            .add_child(ns, "Parsable", NodeKind::Interface { extends: Vec::new() })
            .unwrap();
        model.add_child(ns, "Color", NodeKind::Enum).unwrap();

        let ordered = sort_classes_by_inheritance(&model, ns).unwrap();
        assert_eq!(ordered, vec![user]);
    }
}
