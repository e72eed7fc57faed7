//! DCAT importer
//!
//! Loads DCAT catalog JSON from a file or string into [`DcatCatalog`].

use super::ImportError;
use crate::models::dcat::DcatCatalog;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::{debug, info};

/// Label used in error messages when content does not come from a file
const INLINE_ORIGIN: &str = "<inline>";

/// DCAT importer for parsing DCAT catalog documents
#[derive(Debug, Default)]
pub struct DcatImporter {
    /// Validate against the bundled DCAT schema before deserializing
    validate: bool,
}

impl DcatImporter {
    /// Create a new DCAT importer instance.
    ///
    /// Schema validation is on when the `schema-validation` feature is
    /// enabled.
    pub fn new() -> Self {
        Self {
            validate: cfg!(feature = "schema-validation"),
        }
    }

    /// Toggle schema validation (has no effect without `schema-validation`)
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Load and parse a DCAT JSON file.
    ///
    /// A missing file, malformed JSON and any other read failure are
    /// reported as distinct [`ImportError`] kinds.
    pub fn load_file(&self, path: &Path) -> Result<DcatCatalog, ImportError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.to_path_buf()),
            _ => ImportError::Io {
                origin: path.display().to_string(),
                detail: e.to_string(),
            },
        })?;

        let catalog = self.parse(&content, &path.display().to_string())?;
        info!(
            "Loaded {} DCAT datasets from {}",
            catalog.dataset.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Import DCAT JSON content
    ///
    /// # Example
    ///
    /// ```rust
    /// use catalog_ingest_sdk::import::DcatImporter;
    ///
    /// let importer = DcatImporter::new();
    /// let catalog = importer
    ///     .import(r#"{"dataset": [{"identifier": "ds-1", "title": "Bus stops"}]}"#)
    ///     .unwrap();
    /// assert_eq!(catalog.dataset.len(), 1);
    /// ```
    pub fn import(&self, json_content: &str) -> Result<DcatCatalog, ImportError> {
        self.parse(json_content, INLINE_ORIGIN)
    }

    fn parse(&self, json_content: &str, origin: &str) -> Result<DcatCatalog, ImportError> {
        let value: JsonValue =
            serde_json::from_str(json_content).map_err(|e| ImportError::InvalidJson {
                origin: origin.to_string(),
                detail: e.to_string(),
            })?;

        if self.validate {
            validate_dcat(&value, origin)?;
        }

        let catalog: DcatCatalog =
            serde_json::from_value(value).map_err(|e| ImportError::InvalidStructure {
                origin: origin.to_string(),
                detail: e.to_string(),
            })?;
        debug!("Parsed DCAT document from {}", origin);
        Ok(catalog)
    }
}

#[cfg(feature = "schema-validation")]
fn validate_dcat(value: &JsonValue, origin: &str) -> Result<(), ImportError> {
    use jsonschema::Validator;

    let schema_content = include_str!("../../schemas/dcat-catalog.schema.json");
    let schema: JsonValue =
        serde_json::from_str(schema_content).map_err(|e| ImportError::SchemaValidation {
            origin: origin.to_string(),
            detail: format!("Failed to load DCAT schema: {}", e),
        })?;

    let validator = Validator::new(&schema).map_err(|e| ImportError::SchemaValidation {
        origin: origin.to_string(),
        detail: format!("Failed to compile DCAT schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ImportError::SchemaValidation {
            origin: origin.to_string(),
            detail: error_messages.join("\n"),
        });
    }

    Ok(())
}

#[cfg(not(feature = "schema-validation"))]
fn validate_dcat(_value: &JsonValue, _origin: &str) -> Result<(), ImportError> {
    // Validation disabled - feature not enabled
    Ok(())
}
