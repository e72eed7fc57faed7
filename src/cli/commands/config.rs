//! Config command handlers

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, IngestConfig, sample_config};
use std::path::Path;

/// Write a sample `.catalog-ingest.toml` into `dir`
pub fn handle_config_init(dir: &Path, force: bool) -> Result<(), CliError> {
    let path = dir.join(CONFIG_FILENAME);
    if IngestConfig::exists(dir) && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Print the effective configuration, token masked
pub fn handle_config_show(dir: &Path) -> Result<(), CliError> {
    let mut config = load_config(dir)?;
    if config.datahub.token.is_some() {
        config.datahub.token = Some("********".to_string());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
