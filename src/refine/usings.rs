//! The additional-using rule engine.
//!
//! A rule pairs a structural predicate over one element with a using
//! descriptor: "whatever matches this shape needs symbols S from namespace
//! N". The engine evaluates every rule against every element in one full
//! traversal, then attaches the resulting using declarations at the owning
//! declaration scope.
//!
//! ## Invariants
//!
//! - De-duplication by (symbol name, resolved declaration): two usings for
//!   the same symbol from the same declaration are the same using, however
//!   they were introduced.
//! - Idempotence: applying the same rule set to an already-refined tree adds
//!   nothing.

use crate::errors::Result;
use crate::model::{CodeModel, NodeId, NodeKind};

/// Predicate over one element of the tree.
pub type UsingPredicate = fn(&CodeModel, NodeId) -> bool;

/// Declarative import-injection rule.
#[derive(Debug, Clone)]
pub struct UsingRule {
    /// Structural predicate deciding which elements need the import.
    pub matches: UsingPredicate,
    /// Namespace the symbols come from.
    pub namespace: &'static str,
    /// Symbols to import.
    pub symbols: &'static [&'static str],
    /// Erasable usings may be removed by a later pass if nothing references
    /// them in the written output.
    pub erasable: bool,
}

/// Evaluates a fixed rule set against the whole tree.
///
/// Rule registration is data-driven: adding a rule never requires engine
/// changes.
#[derive(Debug, Clone, Default)]
pub struct AdditionalUsingEngine {
    rules: Vec<UsingRule>,
}

impl AdditionalUsingEngine {
    pub fn new(rules: Vec<UsingRule>) -> Self {
        Self { rules }
    }

    /// Traverse the tree once, collect all (element, rule) matches, and
    /// attach the using declarations they call for. Returns how many usings
    /// were actually added after de-duplication.
    pub fn apply(&self, model: &mut CodeModel) -> Result<usize> {
        let root = model.root();
        let mut matches: Vec<(NodeId, usize)> = Vec::new();
        for element in model.descendants(root) {
            for (index, rule) in self.rules.iter().enumerate() {
                if (rule.matches)(model, element) {
                    matches.push((element, index));
                }
            }
        }

        let mut added = 0;
        for (element, index) in matches {
            let rule = &self.rules[index];
            // Usings attach to the element's owning declaration block, or to
            // its namespace for namespace-level matches.
            let Some(scope) = model
                .owning_declaration(element)
                .or_else(|| model.owning_namespace(element))
            else {
                continue;
            };
            for symbol in rule.symbols {
                let declaration = model
                    .find_namespace(rule.namespace)
                    .and_then(|ns| model.find_child(ns, symbol));
                if has_using(model, scope, symbol, declaration) {
                    continue;
                }
                model.add_child(
                    scope,
                    *symbol,
                    NodeKind::Using {
                        source_namespace: rule.namespace.to_string(),
                        declaration,
                        erasable: rule.erasable,
                    },
                )?;
                added += 1;
            }
        }
        if added > 0 {
            tracing::debug!(added, "injected additional using declarations");
        }
        Ok(added)
    }
}

/// Using equality is (name, originating declaration), regardless of how the
/// using was introduced.
fn has_using(model: &CodeModel, scope: NodeId, symbol: &str, declaration: Option<NodeId>) -> bool {
    model.children(scope).iter().any(|&child| {
        matches!(
            model.kind(child),
            NodeKind::Using { declaration: existing, .. } if *existing == declaration
        ) && model.name(child) == symbol
    })
}

/// Count all using declarations in the tree (test and erasure support).
pub fn count_usings(model: &CodeModel) -> usize {
    model
        .descendants(model.root())
        .filter(|&n| matches!(model.kind(n), NodeKind::Using { .. }))
        .count()
}
