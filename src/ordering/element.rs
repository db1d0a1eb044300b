//! Declaration-kind ordering of sibling elements.

use crate::model::{CodeModel, NodeId, NodeKind};

use super::weights::{FunctionPlacement, kind_weight, method_kind_weight};

/// Total, deterministic order over model elements.
///
/// The result is a signed magnitude: the sign is the contract, the magnitude
/// reflects distance in the fixed weight table and is pinned by regression
/// tests. An absent element sorts before any present one; two absent
/// elements compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementOrderComparer {
    placement: FunctionPlacement,
}

impl ElementOrderComparer {
    pub fn new(placement: FunctionPlacement) -> Self {
        Self { placement }
    }

    pub fn compare(&self, model: &CodeModel, a: Option<NodeId>, b: Option<NodeId>) -> i32 {
        match (a, b) {
            (None, None) => 0,
            (None, Some(_)) => -1,
            (Some(_), None) => 1,
            (Some(a), Some(b)) => self.compare_nodes(model, a, b),
        }
    }

    /// Sort a slice of sibling ids in place.
    pub fn sort(&self, model: &CodeModel, ids: &mut [NodeId]) {
        ids.sort_by(|&a, &b| self.compare_nodes(model, a, b).cmp(&0));
    }

    fn compare_nodes(&self, model: &CodeModel, a: NodeId, b: NodeId) -> i32 {
        if a == b {
            return 0;
        }
        let diff = kind_weight(model.kind(a), self.placement)
            - kind_weight(model.kind(b), self.placement);
        if diff != 0 {
            return diff;
        }
        if let (NodeKind::Method { kind: ka, .. }, NodeKind::Method { kind: kb, .. }) =
            (model.kind(a), model.kind(b))
        {
            let diff = method_kind_weight(*ka) - method_kind_weight(*kb);
            if diff != 0 {
                return diff;
            }
        }
        // Same precedence class: fall back to insertion order, then name,
        // then identity so the order stays strict and total.
        let diff = (model.node(a).order() as i64 - model.node(b).order() as i64).signum() as i32;
        if diff != 0 {
            return diff;
        }
        let diff = ordinal_ci(model.name(a), model.name(b));
        if diff != 0 {
            return diff;
        }
        match a.cmp(&b) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }
}

/// Ordinal, case-insensitive comparison collapsed to {-1, 0, 1}.
pub(crate) fn ordinal_ci(a: &str, b: &str) -> i32 {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    match a.cmp(&b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}
