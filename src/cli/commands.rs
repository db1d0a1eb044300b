//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Path, PathBuf};

use crate::config::{GenerationConfig, GenerationLanguage};
use crate::describe;
use crate::generator::Generator;

use super::{CliError, CliResult, ExitCode};

/// Load a description, build the model, and run one generation pass.
#[allow(clippy::too_many_arguments)]
pub fn generate(
    description_path: &Path,
    language: GenerationLanguage,
    output: PathBuf,
    single_file: bool,
    force_barrels: bool,
    models_namespace: String,
    max_path_length: usize,
) -> CliResult<ExitCode> {
    if !description_path.exists() {
        return Err(CliError::failure(format!(
            "description file not found: {}",
            description_path.display()
        )));
    }

    let description = describe::load_description(description_path)?;
    let mut model = describe::build_model(&description)?;

    let mut config = GenerationConfig::new(language, output)
        .with_models_namespace(models_namespace)
        .with_max_path_length(max_path_length);
    config.single_file = single_file;
    config.force_barrel_files = force_barrels;

    Generator::new(config).generate(&mut model)?;
    Ok(ExitCode::SUCCESS)
}
