//! The fixed weight tables behind the deterministic comparers.
//!
//! Callers of a comparer may only rely on the sign of the result, but the
//! tables themselves are versioned: regression tests pin exact magnitudes so
//! an accidental reshuffle shows up as a diff. Weights are spaced so that a
//! kind difference always dominates any intra-kind tie-break.

use crate::model::{MethodKind, NodeKind, ParameterKind};

/// Where free functions sort relative to type declarations, selected per
/// target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionPlacement {
    /// Functions are emitted before the classes of their namespace.
    BeforeTypes,
    /// Functions are emitted after type declarations.
    #[default]
    AfterTypes,
}

/// Per-kind precedence: usings first, then members, then nested type
/// declarations, namespaces and file groups last.
pub fn kind_weight(kind: &NodeKind, placement: FunctionPlacement) -> i32 {
    match kind {
        NodeKind::Using { .. } => 0,
        NodeKind::EnumMember => 100,
        NodeKind::Parameter { .. } => 150,
        NodeKind::Property { .. } => 200,
        NodeKind::Indexer { .. } => 250,
        NodeKind::Method { .. } => 300,
        NodeKind::Function { .. } => match placement {
            FunctionPlacement::BeforeTypes => 400,
            FunctionPlacement::AfterTypes => 550,
        },
        NodeKind::Class { .. } | NodeKind::Interface { .. } | NodeKind::Enum => 500,
        NodeKind::File { .. } => 580,
        NodeKind::Namespace => 600,
    }
}

/// Within methods: constructors first, then request builders, then the rest.
pub fn method_kind_weight(kind: MethodKind) -> i32 {
    match kind {
        MethodKind::Constructor => 0,
        MethodKind::RequestBuilder => 10,
        MethodKind::Custom => 20,
    }
}

/// Within parameters of the same optionality: payload-carrying parameters
/// first, configuration next, cancellation last.
pub fn parameter_kind_weight(kind: ParameterKind) -> i32 {
    match kind {
        ParameterKind::Custom => 10,
        ParameterKind::RequestBody => 20,
        ParameterKind::RequestConfiguration => 30,
        ParameterKind::Cancellation => 40,
    }
}

/// Added to a parameter's weight when it is optional, so every required
/// parameter precedes every optional one regardless of kind.
pub const OPTIONAL_PARAMETER_WEIGHT: i32 = 1_000;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;

    #[test]
    fn test_kind_weights_put_usings_before_members_before_types() {
        let using = NodeKind::Using {
            source_namespace: String::new(),
            declaration: None,
            erasable: false,
        };
        let property = NodeKind::Property {
            kind: crate::model::PropertyKind::Custom,
            ty: TypeRef::named("string"),
        };
        let class = NodeKind::Class {
            base: None,
            implements: Vec::new(),
        };
        let placement = FunctionPlacement::default();
        assert!(kind_weight(&using, placement) < kind_weight(&property, placement));
        assert!(kind_weight(&property, placement) < kind_weight(&class, placement));
    }

    #[test]
    fn test_function_placement_flips_relative_to_types() {
        let function = NodeKind::Function {
            return_type: TypeRef::void(),
        };
        let class = NodeKind::Class {
            base: None,
            implements: Vec::new(),
        };
        let before = FunctionPlacement::BeforeTypes;
        let after = FunctionPlacement::AfterTypes;
        assert!(kind_weight(&function, before) < kind_weight(&class, before));
        assert!(kind_weight(&function, after) > kind_weight(&class, after));
    }
}
