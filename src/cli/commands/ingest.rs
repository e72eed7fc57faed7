//! Ingest command handler

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::config::IngestConfig;
use crate::convert::transform_catalog;
use crate::emit::{FileEmitter, MetadataEmitter, RestEmitter, RestEmitterConfig, ingest_with};
use crate::import::DcatImporter;
use std::path::PathBuf;
use tracing::info;

/// Default DCAT input file
pub const DEFAULT_INPUT: &str = "dcat_metadata.json";

/// Arguments for the ingest command
#[derive(Debug, Clone, Default)]
pub struct IngestArgs {
    pub input: PathBuf,
    /// Write events to this file instead of sending them to DataHub
    pub output: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub platform: Option<String>,
    pub env: Option<String>,
    pub domain: Option<String>,
    pub config_dir: PathBuf,
}

impl IngestArgs {
    /// Layer command line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut IngestConfig) {
        if let Some(ref endpoint) = self.endpoint {
            config.datahub.endpoint = endpoint.clone();
        }
        if let Some(ref platform) = self.platform {
            config.catalog.platform = platform.clone();
        }
        if let Some(ref env) = self.env {
            config.catalog.env = env.clone();
        }
        if let Some(ref domain) = self.domain {
            config.catalog.domain = domain.clone();
        }
    }
}

/// Handle the ingest command
pub async fn handle_ingest(args: &IngestArgs) -> Result<(), CliError> {
    let mut config = load_config(&args.config_dir)?;
    args.apply_to(&mut config);

    let catalog = DcatImporter::new().load_file(&args.input)?;
    let events = transform_catalog(&catalog, &config.catalog);
    info!(
        "Transformed {} datasets from {}",
        events.len(),
        args.input.display()
    );

    let emitter: Box<dyn MetadataEmitter> = match args.output {
        Some(ref path) => Box::new(FileEmitter::new(path)),
        None => Box::new(RestEmitter::new(RestEmitterConfig::from(&config.datahub))?),
    };

    let summary = ingest_with(emitter.as_ref(), &events, |urn, result| match result {
        Ok(()) => println!("Successfully emitted: {}", urn),
        Err(e) => {
            println!("Failed to emit: {}", urn);
            println!("Error: {}", e);
        }
    })
    .await?;

    if let Some(ref path) = args.output {
        println!(
            "Wrote {} events to {}",
            summary.emitted_count(),
            path.display()
        );
    }
    Ok(())
}
