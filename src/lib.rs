//! Catalog Ingest SDK - DCAT to DataHub ingestion and data quality suites
//!
//! Provides unified interfaces for:
//! - Loading DCAT catalog documents
//! - Mapping DCAT datasets to DataHub metadata change events
//! - Emitting events to DataHub GMS or to a file
//! - Defining Great Expectations suites for the source tables
//! - Configuration and input validation

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod emit;
pub mod import;
pub mod models;
pub mod quality;
pub mod validation;

// Re-export commonly used types
pub use config::{CatalogSettings, ConfigError, IngestConfig};
pub use convert::{transform_catalog, transform_dcat_to_mce, transform_distribution_to_properties};
pub use emit::{
    EmitError, FileEmitter, IngestSummary, MetadataEmitter, RestEmitter, RestEmitterConfig, ingest,
    ingest_with,
};
pub use import::{DcatImporter, ImportError};
pub use validation::ValidationError;

// Re-export models
pub use models::{
    DatasetAspect, DatasetSnapshot, DcatCatalog, DcatDataset, Distribution, MetadataChangeEvent,
    make_data_platform_urn, make_dataset_urn, make_domain_urn, make_user_urn,
};

// Re-export quality types
pub use quality::{
    BatchRequest, DatasourceConfig, Expectation, ExpectationSuite, FileSuiteStore,
    InMemorySuiteStore, SuiteError, SuiteStore, TableValidation, ValidationContext, ValidationRun,
};
