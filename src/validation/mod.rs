//! Validation functionality
//!
//! Provides input validation for names and identifiers used by the
//! expectation suites and their batch requests.

pub mod input;

pub use input::{ValidationError, validate_identifier, validate_suite_name};
