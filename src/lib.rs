#![forbid(unsafe_code)]
//! Quill: a deterministic API-description-to-source-code generator.
//!
//! Quill consumes an abstract, language-agnostic model of a client API
//! surface (the CodeDOM) and renders it into idiomatic source files for a
//! target language, applying per-language refinements and producing
//! filesystem-safe, reproducible output paths.
//!
//! ## Pipeline
//!
//! ```text
//! API description → CodeModel → Refiner → ordered render → source files
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod describe;
pub mod errors;
pub mod generator;
pub mod languages;
pub mod model;
pub mod ordering;
pub mod paths;
pub mod refine;
pub mod render;
pub mod version;

pub use cancellation::CancellationToken;
pub use config::{GenerationConfig, GenerationLanguage};
pub use errors::{GenError, Result};
pub use generator::Generator;
pub use model::{CodeModel, NodeId, NodeKind};
pub use ordering::{ElementOrderComparer, FunctionPlacement, ParameterOrderComparer};
pub use paths::{PathPolicy, PathSegmenter};
pub use refine::{AdditionalUsingEngine, Refiner, UsingRule};
pub use render::{CodeRenderer, LanguageConventionService, LanguageWriter};
