//! CLI command implementations

pub mod config;
pub mod ingest;
pub mod ping;
pub mod suites;
pub mod transform;

use crate::cli::error::CliError;
use crate::config::IngestConfig;
use std::path::Path;
use tracing::debug;

/// Load configuration from `config_dir`, falling back to defaults
pub fn load_config(config_dir: &Path) -> Result<IngestConfig, CliError> {
    let config = IngestConfig::load(config_dir)?;
    debug!("Loaded configuration from {}", config_dir.display());
    Ok(config)
}
