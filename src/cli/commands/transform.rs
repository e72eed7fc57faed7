//! Transform command handler: print events without emitting them

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::convert::transform_catalog;
use crate::import::DcatImporter;
use crate::models::MetadataChangeEvent;
use std::path::PathBuf;

/// Output format for printed events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the transform command
#[derive(Debug, Clone)]
pub struct TransformArgs {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub config_dir: PathBuf,
}

/// Render events in the requested format
pub fn render_events(
    events: &[MetadataChangeEvent],
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(events)
            .map_err(|e| CliError::OutputError(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(events).map_err(|e| CliError::OutputError(e.to_string()))
        }
    }
}

/// Handle the transform command
pub fn handle_transform(args: &TransformArgs) -> Result<(), CliError> {
    let config = load_config(&args.config_dir)?;
    let catalog = DcatImporter::new().load_file(&args.input)?;
    let events = transform_catalog(&catalog, &config.catalog);
    println!("{}", render_events(&events, args.format)?);
    Ok(())
}
