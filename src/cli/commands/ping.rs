//! Ping command handler

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::emit::{MetadataEmitter, RestEmitter, RestEmitterConfig};
use std::path::PathBuf;

/// Arguments for the ping command
#[derive(Debug, Clone)]
pub struct PingArgs {
    pub endpoint: Option<String>,
    pub config_dir: PathBuf,
}

/// Check that the configured DataHub instance answers
pub async fn handle_ping(args: &PingArgs) -> Result<(), CliError> {
    let mut config = load_config(&args.config_dir)?;
    if let Some(ref endpoint) = args.endpoint {
        config.datahub.endpoint = endpoint.clone();
    }

    let emitter = RestEmitter::new(RestEmitterConfig::from(&config.datahub))?;
    emitter.test_connection().await?;
    println!("Connected to DataHub at {}", emitter.endpoint());
    Ok(())
}
