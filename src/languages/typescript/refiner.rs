//! The TypeScript refiner: reserved-name escaping and default imports.

use crate::config::GenerationConfig;
use crate::errors::Result;
use crate::model::{CodeModel, MethodKind, NodeId, NodeKind, ParameterKind};
use crate::refine::{AdditionalUsingEngine, Refiner, UsingRule};

use super::conventions::TypeScriptConventions;

/// Namespace the runtime abstraction symbols come from.
const ABSTRACTIONS: &str = "@quill/abstractions";

/// Adapts the generic model to TypeScript idioms.
///
/// Passes, in order:
/// 1. Escape declaration and member names that collide with reserved words.
/// 2. Inject default imports through the additional-using rule engine.
#[derive(Debug)]
pub struct TypeScriptRefiner {
    usings: AdditionalUsingEngine,
}

impl TypeScriptRefiner {
    pub fn new() -> Self {
        Self {
            usings: AdditionalUsingEngine::new(default_using_rules()),
        }
    }

    fn escape_reserved_names(&self, model: &mut CodeModel) -> Result<()> {
        let renames: Vec<NodeId> = model
            .descendants(model.root())
            .filter(|&id| {
                !matches!(model.kind(id), NodeKind::Namespace | NodeKind::Using { .. })
                    && TypeScriptConventions::is_reserved(model.name(id))
            })
            .collect();
        for id in renames {
            let escaped = TypeScriptConventions::escaped(model.name(id));
            tracing::debug!(from = %model.name(id), to = %escaped, "escaping reserved name");
            model.rename(id, escaped)?;
        }
        Ok(())
    }
}

impl Refiner for TypeScriptRefiner {
    fn refine(&self, model: &mut CodeModel, _config: &GenerationConfig) -> Result<()> {
        self.escape_reserved_names(model)?;
        self.usings.apply(model)?;
        Ok(())
    }
}

/// The default import-injection rules.
fn default_using_rules() -> Vec<UsingRule> {
    vec![
        // Model classes participating in inheritance need the parse
        // infrastructure to round-trip their payloads.
        UsingRule {
            matches: is_derived_class,
            namespace: ABSTRACTIONS,
            symbols: &["Parsable", "ParseNode"],
            erasable: false,
        },
        // Request builders talk to the transport through the adapter.
        UsingRule {
            matches: has_request_builder_method,
            namespace: ABSTRACTIONS,
            symbols: &["RequestAdapter"],
            erasable: false,
        },
        // Cancellable operations surface the token type in signatures.
        UsingRule {
            matches: has_cancellation_parameter,
            namespace: ABSTRACTIONS,
            symbols: &["CancellationToken"],
            erasable: true,
        },
    ]
}

fn is_derived_class(model: &CodeModel, id: NodeId) -> bool {
    match model.kind(id) {
        NodeKind::Class { base, implements } => base.is_some() || !implements.is_empty(),
        _ => false,
    }
}

fn has_request_builder_method(model: &CodeModel, id: NodeId) -> bool {
    matches!(
        model.kind(id),
        NodeKind::Method {
            kind: MethodKind::RequestBuilder,
            ..
        }
    )
}

fn has_cancellation_parameter(model: &CodeModel, id: NodeId) -> bool {
    matches!(
        model.kind(id),
        NodeKind::Parameter {
            kind: ParameterKind::Cancellation,
            ..
        }
    )
}
