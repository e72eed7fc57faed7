//! Import functionality
//!
//! Provides parsers for importing catalog metadata:
//! - DCAT (Data Catalog Vocabulary) JSON documents

pub mod dcat;

use std::path::PathBuf;

/// Error during import.
///
/// Each kind renders a distinct message so a missing file, a malformed
/// document and any other read failure can be told apart by the user.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Error: {} file not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("Error: Invalid JSON format in {origin}: {detail}")]
    InvalidJson { origin: String, detail: String },
    #[error("Unexpected error reading {origin}: {detail}")]
    Io { origin: String, detail: String },
    #[error("Unexpected error: {origin} is not a DCAT catalog: {detail}")]
    InvalidStructure { origin: String, detail: String },
    #[error("DCAT validation failed for {origin}:\n{detail}")]
    SchemaValidation { origin: String, detail: String },
}

impl ImportError {
    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::FileNotFound(_) => "file_not_found",
            ImportError::InvalidJson { .. } => "invalid_json",
            ImportError::Io { .. } => "io",
            ImportError::InvalidStructure { .. } => "invalid_structure",
            ImportError::SchemaValidation { .. } => "schema_validation",
        }
    }
}

// Re-export for convenience
pub use dcat::DcatImporter;
