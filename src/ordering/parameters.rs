//! Parameter ordering: required before optional, then kind precedence.

use crate::model::{CodeModel, NodeId, NodeKind, ParameterKind};

use super::element::ordinal_ci;
use super::weights::{OPTIONAL_PARAMETER_WEIGHT, parameter_kind_weight};

/// Deterministic order over the parameters of a method or function.
///
/// Required parameters precede optional ones; within the same optionality a
/// fixed kind precedence applies (payload before request configuration
/// before cancellation). A target-language convention may substitute its own
/// kind weight table; the default table is stable across releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterOrderComparer {
    kind_weights: Option<fn(ParameterKind) -> i32>,
}

impl ParameterOrderComparer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a per-language kind weight table instead of the default.
    pub fn with_kind_weights(weights: fn(ParameterKind) -> i32) -> Self {
        Self {
            kind_weights: Some(weights),
        }
    }

    pub fn compare(&self, model: &CodeModel, a: Option<NodeId>, b: Option<NodeId>) -> i32 {
        match (a, b) {
            (None, None) => 0,
            (None, Some(_)) => -1,
            (Some(_), None) => 1,
            (Some(a), Some(b)) => self.compare_nodes(model, a, b),
        }
    }

    /// Sort a method's parameter ids in place.
    pub fn sort(&self, model: &CodeModel, ids: &mut [NodeId]) {
        ids.sort_by(|&a, &b| self.compare_nodes(model, a, b).cmp(&0));
    }

    fn compare_nodes(&self, model: &CodeModel, a: NodeId, b: NodeId) -> i32 {
        if a == b {
            return 0;
        }
        let diff = self.weight(model, a) - self.weight(model, b);
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

    fn weight(&self, model: &CodeModel, id: NodeId) -> i32 {
        match model.kind(id) {
            NodeKind::Parameter { kind, optional, .. } => {
                let kind_weight = match self.kind_weights {
                    Some(weights) => weights(*kind),
                    None => parameter_kind_weight(*kind),
                };
                if *optional {
                    kind_weight + OPTIONAL_PARAMETER_WEIGHT
                } else {
                    kind_weight
                }
            }
            // Non-parameters carry no weight; the comparer is only meaningful
            // for parameter siblings.
            _ => 0,
        }
    }
}
