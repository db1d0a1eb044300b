//! Generation configuration.
//!
//! All options are threaded by reference into the components that need them;
//! there is no ambient global configuration lookup. The struct derives
//! `Deserialize` so a JSON config file can stand in for CLI flags.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Target languages the CLI accepts.
///
/// Only languages with a registered refiner/writer pair can actually
/// generate; selecting any other value is an unsupported-configuration error
/// surfaced before rendering begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum GenerationLanguage {
    TypeScript,
    CSharp,
    Go,
    Java,
    Python,
}

impl fmt::Display for GenerationLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationLanguage::TypeScript => "typescript",
            GenerationLanguage::CSharp => "csharp",
            GenerationLanguage::Go => "go",
            GenerationLanguage::Java => "java",
            GenerationLanguage::Python => "python",
        };
        write!(f, "{}", name)
    }
}

/// Options recognized by the generation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Target language selector.
    pub language: GenerationLanguage,
    /// Root directory all output paths are joined onto.
    pub output_root: PathBuf,
    /// Emit barrel files even when the namespace already contains a
    /// declaration named after the namespace's last segment.
    #[serde(default)]
    pub force_barrel_files: bool,
    /// Dotted name of the models namespace subtree (barrel emission in the
    /// TypeScript renderer is restricted to this subtree).
    #[serde(default = "default_models_namespace")]
    pub models_namespace: String,
    /// Ceiling on the total relative output path length, in characters.
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
    /// Serialize the whole tree into a single output file instead of one
    /// file per declaration.
    #[serde(default)]
    pub single_file: bool,
}

fn default_models_namespace() -> String {
    "Models".to_string()
}

fn default_max_path_length() -> usize {
    200
}

impl GenerationConfig {
    /// Build a config with defaults for everything except language and
    /// output root.
    pub fn new(language: GenerationLanguage, output_root: impl Into<PathBuf>) -> Self {
        Self {
            language,
            output_root: output_root.into(),
            force_barrel_files: false,
            models_namespace: default_models_namespace(),
            max_path_length: default_max_path_length(),
            single_file: false,
        }
    }

    /// Override the path-length ceiling.
    pub fn with_max_path_length(mut self, max: usize) -> Self {
        self.max_path_length = max;
        self
    }

    /// Force barrel emission even over same-named declarations.
    pub fn with_forced_barrels(mut self) -> Self {
        self.force_barrel_files = true;
        self
    }

    /// Set the models namespace subtree name.
    pub fn with_models_namespace(mut self, name: impl Into<String>) -> Self {
        self.models_namespace = name.into();
        self
    }
}
