//! Target-language registry.
//!
//! Languages plug in as (refiner, writer) pairs. Selecting a language with
//! no registered pair is an unsupported-configuration error raised before
//! any rendering begins — never silently ignored.

pub mod typescript;

use crate::config::GenerationLanguage;
use crate::errors::{GenError, Result};
use crate::refine::Refiner;
use crate::render::LanguageWriter;

use typescript::{TypeScriptRefiner, TypeScriptWriter};

/// The refiner registered for `language`.
pub fn refiner_for(language: GenerationLanguage) -> Result<Box<dyn Refiner>> {
    match language {
        GenerationLanguage::TypeScript => Ok(Box::new(TypeScriptRefiner::new())),
        other => Err(GenError::UnsupportedLanguage(other.to_string())),
    }
}

/// The writer registered for `language`.
pub fn writer_for(language: GenerationLanguage) -> Result<Box<dyn LanguageWriter>> {
    match language {
        GenerationLanguage::TypeScript => Ok(Box::new(TypeScriptWriter::new())),
        other => Err(GenError::UnsupportedLanguage(other.to_string())),
    }
}
