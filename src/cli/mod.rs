//! CLI module for the Quill generator.
//!
//! ## Commands
//!
//! - `generate` - Render an API description into target-language source
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::GenerationLanguage;
use crate::version::QUILL_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::GenError> for CliError {
    fn from(err: crate::errors::GenError) -> Self {
        CliError::failure(err.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Quill source generator
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version = QUILL_VERSION)]
#[command(about = "Deterministic API-description-to-source generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an API description into target-language source files
    Generate {
        /// JSON API description document
        #[arg(short, long, value_name = "FILE")]
        description: PathBuf,
        /// Target language
        #[arg(short, long, value_enum)]
        language: GenerationLanguage,
        /// Output root directory
        #[arg(short, long, value_name = "DIR", default_value = "generated")]
        output: PathBuf,
        /// Serialize everything into one file instead of one per declaration
        #[arg(long)]
        single_file: bool,
        /// Emit barrel files even over same-named declarations
        #[arg(long)]
        force_barrels: bool,
        /// Dotted name of the models namespace subtree
        #[arg(long, value_name = "NAME", default_value = "Models")]
        models_namespace: String,
        /// Ceiling on generated path lengths
        #[arg(long, value_name = "CHARS", default_value_t = 200)]
        max_path_length: usize,
    },
}

/// Top-level CLI entry: parse, dispatch, report, exit.
pub fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate {
            description,
            language,
            output,
            single_file,
            force_barrels,
            models_namespace,
            max_path_length,
        } => commands::generate(
            &description,
            language,
            output,
            single_file,
            force_barrels,
            models_namespace,
            max_path_length,
        ),
    };
    match result {
        Ok(code) => process::exit(code.0),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(err.exit_code.0);
        }
    }
}
