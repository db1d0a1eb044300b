//! Error types for the generation pipeline.
//!
//! Every failure in the pipeline is synchronous and raised at the point of
//! detection; nothing is retried. A fatal error aborts the run and leaves
//! already-written files on disk (there is no transactional rollback).

use std::path::PathBuf;

/// Error raised by the generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A required reference (writer, element, namespace, output path) was
    /// absent or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The selected target language has no registered refiner/writer.
    #[error("no generator is registered for language `{0}`")]
    UnsupportedLanguage(String),

    /// A computed output path exceeds the configured ceiling even after
    /// digest-based shortening.
    #[error("output path `{path}` cannot fit under the {max} character limit")]
    PathOverflow { path: PathBuf, max: usize },

    /// The model tree violates a structural invariant, e.g. an inheritance
    /// cycle or a child attached to a parent kind that cannot own it.
    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),

    /// Cooperative cancellation was requested between file writes.
    #[error("generation was cancelled")]
    Cancelled,

    /// The API description input could not be parsed.
    #[error("failed to parse API description: {0}")]
    Description(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("text formatting failed")]
    Fmt(#[from] std::fmt::Error),
}

impl GenError {
    /// Shorthand for an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        GenError::InvalidArgument(msg.into())
    }

    /// Shorthand for a structural-inconsistency error.
    pub fn structural(msg: impl Into<String>) -> Self {
        GenError::StructuralInconsistency(msg.into())
    }
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, GenError>;
