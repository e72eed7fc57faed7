//! Metadata emission
//!
//! Sends metadata change events to a catalog. The [`MetadataEmitter`] trait
//! is the seam between the mapping and the transport:
//! - [`RestEmitter`] posts events to a DataHub GMS instance
//! - [`FileEmitter`] collects events into a JSON file (dry runs, offline)

pub mod file;
pub mod rest;

use crate::models::MetadataChangeEvent;
use async_trait::async_trait;
use tracing::{info, warn};

/// Error during emission
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Authentication failed (HTTP {status}): {body}")]
    Auth { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Emitter configuration error: {0}")]
    Config(String),
}

/// A sink for metadata change events
#[async_trait]
pub trait MetadataEmitter: Send + Sync {
    /// Emit a single event
    async fn emit(&self, event: &MetadataChangeEvent) -> Result<(), EmitError>;

    /// Check that the sink is reachable and usable
    async fn test_connection(&self) -> Result<(), EmitError>;

    /// Persist anything buffered by [`emit`](Self::emit)
    async fn flush(&self) -> Result<(), EmitError> {
        Ok(())
    }
}

/// Outcome of emitting a batch of events.
#[derive(Debug, Default)]
#[must_use = "ingest summaries carry per-event failures and should be checked"]
pub struct IngestSummary {
    /// Per-event results, in emission order
    pub outcomes: Vec<(String, Result<(), EmitError>)>,
}

impl IngestSummary {
    /// URNs emitted successfully
    pub fn emitted(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(urn, _)| urn.as_str())
    }

    /// URNs that failed, with their error
    pub fn failed(&self) -> impl Iterator<Item = (&str, &EmitError)> {
        self.outcomes.iter().filter_map(|(urn, r)| match r {
            Err(e) => Some((urn.as_str(), e)),
            Ok(()) => None,
        })
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Emit every event, continuing past individual failures, then flush.
///
/// Only a failing flush is returned as an error; per-event failures are
/// recorded in the summary.
pub async fn ingest(
    emitter: &dyn MetadataEmitter,
    events: &[MetadataChangeEvent],
) -> Result<IngestSummary, EmitError> {
    ingest_with(emitter, events, |_, _| {}).await
}

/// Like [`ingest`], but hands each outcome to `on_outcome` as soon as the
/// event has been emitted, so callers still see them if the flush fails.
pub async fn ingest_with<F>(
    emitter: &dyn MetadataEmitter,
    events: &[MetadataChangeEvent],
    mut on_outcome: F,
) -> Result<IngestSummary, EmitError>
where
    F: FnMut(&str, &Result<(), EmitError>) + Send,
{
    let mut summary = IngestSummary::default();
    for event in events {
        let urn = event.urn().to_string();
        let result = emitter.emit(event).await;
        match &result {
            Ok(()) => info!("Successfully emitted: {}", urn),
            Err(e) => warn!("Failed to emit: {}: {}", urn, e),
        }
        on_outcome(&urn, &result);
        summary.outcomes.push((urn, result));
    }
    emitter.flush().await?;

    info!(
        "Emitted {} events ({} failed)",
        summary.emitted_count(),
        summary.failed_count()
    );
    Ok(summary)
}

// Re-export for convenience
pub use file::FileEmitter;
pub use rest::{RestEmitter, RestEmitterConfig};
