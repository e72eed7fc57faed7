//! Data quality expectation suites
//!
//! Defines the expectations applied to each source table, the stores suites
//! are registered in, and the batch requests that point a suite at a table.

pub mod context;
pub mod expectation;
pub mod patterns;
pub mod registry;
pub mod store;
pub mod tables;

pub use context::ValidationContext;
pub use expectation::{
    BatchRequest, Bound, DatasourceConfig, Expectation, ExpectationConfiguration,
    ExpectationSuite, ValidationRun,
};
pub use registry::{
    find_validation, list_archived_modules, list_validation_modules, run_validations,
};
pub use store::{FileSuiteStore, InMemorySuiteStore, SuiteStore};
pub use tables::TableValidation;

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised while building, storing or running expectation suites
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Invalid regex for column '{column}': {detail}")]
    InvalidRegex { column: String, detail: String },

    #[error("Expectation suite already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid suite name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("One or more return values is empty: {0}")]
    EmptyDescriptor(&'static str),

    #[error("Invalid expectation configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Suite store error: {0}")]
    Storage(String),

    #[error("Unknown validation module: {0}")]
    UnknownModule(String),
}
