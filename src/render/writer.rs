//! The language seam: writer and conventions contracts.
//!
//! The renderer and the ordering logic know nothing about any concrete
//! language's syntax. A [`LanguageWriter`] serializes one element (and its
//! members) to text, delegating every idiom decision — type spelling,
//! identifier escaping, file naming — to its conventions and path policies.

use crate::config::GenerationConfig;
use crate::errors::Result;
use crate::model::{CodeModel, NodeId, TypeRef};
use crate::ordering::FunctionPlacement;
use crate::paths::PathPolicy;

/// Per-language naming and type-spelling capability injected into writers.
pub trait LanguageConventionService: Sync {
    /// Spell a type reference in the target language.
    fn type_string(&self, model: &CodeModel, ty: &TypeRef) -> String;

    /// Escape an identifier that collides with a reserved word.
    fn escape_identifier(&self, name: &str) -> String;
}

/// Serializes model elements into target-language source text.
pub trait LanguageWriter: Sync {
    /// File naming policy for the path segmenter.
    fn path_policy(&self) -> &dyn PathPolicy;

    /// Where free functions sort relative to type declarations.
    fn function_placement(&self) -> FunctionPlacement {
        FunctionPlacement::default()
    }

    /// Append the textual declaration of `element` to `out`. Namespace
    /// elements produce barrel (re-export) content.
    fn write(&self, model: &CodeModel, element: NodeId, out: &mut String) -> Result<()>;

    /// Whether a barrel file should be emitted for `namespace`.
    ///
    /// The default rule suppresses the barrel when the namespace already
    /// holds a declaration named after its last segment, unless
    /// configuration forces barrels anyway.
    fn should_render_namespace_file(
        &self,
        model: &CodeModel,
        namespace: NodeId,
        config: &GenerationConfig,
    ) -> bool {
        default_barrel_rule(model, namespace, config)
    }
}

/// The default barrel-suppression rule.
///
/// A barrel re-exports the namespace's declarations; when a declaration
/// already carries the namespace's own name, the re-export would collide
/// with it, so the barrel is suppressed.
pub fn default_barrel_rule(
    model: &CodeModel,
    namespace: NodeId,
    config: &GenerationConfig,
) -> bool {
    let declarations: Vec<NodeId> = model
        .children(namespace)
        .iter()
        .copied()
        .filter(|&c| model.kind(c).is_declaration())
        .collect();
    if declarations.is_empty() {
        return false;
    }
    if config.force_barrel_files {
        return true;
    }
    let simple = model.node(namespace).simple_name();
    !declarations
        .iter()
        .any(|&d| model.name(d).eq_ignore_ascii_case(simple))
}
