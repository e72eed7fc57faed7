//! File emitter
//!
//! Buffers events in memory and writes them as a single JSON array on
//! flush, in the same shape the REST emitter would send as snapshots.

use super::{EmitError, MetadataEmitter};
use crate::models::MetadataChangeEvent;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

/// Emitter writing events to a JSON file
pub struct FileEmitter {
    path: PathBuf,
    buffer: Mutex<Vec<MetadataChangeEvent>>,
}

impl FileEmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MetadataEmitter for FileEmitter {
    async fn emit(&self, event: &MetadataChangeEvent) -> Result<(), EmitError> {
        self.buffer.lock().await.push(event.clone());
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), EmitError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(EmitError::Io(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )))
            }
            _ => Ok(()),
        }
    }

    async fn flush(&self) -> Result<(), EmitError> {
        let buffer = self.buffer.lock().await;
        let content = serde_json::to_string_pretty(&*buffer)
            .map_err(|e| EmitError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| EmitError::Io(format!("{}: {}", self.path.display(), e)))?;
        info!("Wrote {} events to {}", buffer.len(), self.path.display());
        Ok(())
    }
}
