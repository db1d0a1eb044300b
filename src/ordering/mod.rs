//! Deterministic ordering of model elements.
//!
//! Reproducible diffs require that every run emits declarations in the same
//! sequence, so all ordering here is pure and total:
//!
//! - [`ElementOrderComparer`] ranks siblings by declaration kind (usings →
//!   members → nested types, constructors ahead of other methods).
//! - [`ParameterOrderComparer`] ranks parameters (required → optional, then
//!   kind precedence).
//! - [`sort_classes_by_inheritance`] sequences sibling classes so base types
//!   are declared before derived ones.
//!
//! The numeric weight tables live in [`weights`] and are pinned by tests.

pub mod element;
pub mod inheritance;
pub mod parameters;
pub mod weights;

pub use element::ElementOrderComparer;
pub use inheritance::sort_classes_by_inheritance;
pub use parameters::ParameterOrderComparer;
pub use weights::FunctionPlacement;
