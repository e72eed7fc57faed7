//! CLI-specific error types

use crate::config::ConfigError;
use crate::emit::EmitError;
use crate::import::ImportError;
use crate::quality::SuiteError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Input errors already carry their user-facing wording
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Error: {0}")]
    Emit(#[from] EmitError),

    #[error("Error: {0}")]
    Suite(#[from] SuiteError),

    #[error("Error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error: Failed to write file {}: {}", .0.display(), .1)]
    FileWriteError(PathBuf, String),

    #[error("Error: Failed to render output: {0}")]
    OutputError(String),

    #[error("Error: {0} of {1} validation modules failed")]
    ValidationFailures(usize, usize),

    #[error("Error: Invalid argument: {0}")]
    InvalidArgument(String),
}
