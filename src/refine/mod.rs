//! Per-language refinement of the model tree.
//!
//! A refiner adapts the generic model to one target language's idioms before
//! rendering: escaping reserved names, injecting imports, synthesizing
//! helper declarations. Refiners run to completion before the renderer
//! starts, so the tree is logically immutable during rendering.
//!
//! The generic machinery provided here is the additional-using rule engine
//! in [`usings`]; concrete refiners live with their language packs and are
//! selected through [`crate::languages::refiner_for`].

pub mod usings;

pub use usings::{AdditionalUsingEngine, UsingRule};

use crate::config::GenerationConfig;
use crate::errors::Result;
use crate::model::CodeModel;

/// A target-language transformation pass over the model tree.
pub trait Refiner: std::fmt::Debug {
    /// Mutate the tree in place, starting at the root namespace.
    fn refine(&self, model: &mut CodeModel, config: &GenerationConfig) -> Result<()>;
}
