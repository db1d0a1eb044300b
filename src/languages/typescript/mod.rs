//! TypeScript convention pack.
//!
//! A deliberately compact language backend: enough refiner, conventions, and
//! writer surface to exercise every generic seam (using injection, barrel
//! override, path policy) without specifying a full TypeScript grammar.

pub mod conventions;
pub mod refiner;
pub mod writer;

pub use conventions::TypeScriptConventions;
pub use refiner::TypeScriptRefiner;
pub use writer::TypeScriptWriter;
