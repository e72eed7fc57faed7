//! Input validation utilities.
//!
//! Suite names become file names in the suite store and identifiers end
//! up in batch requests sent to a datasource, so both are checked before
//! use.
//!
//! # Security
//!
//! Input validation prevents:
//! - Path traversal via malicious suite names
//! - Injection via identifiers containing quotes or separators

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length for suite names
pub const MAX_SUITE_NAME_LENGTH: usize = 255;

/// Maximum length for identifiers in general
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

static RE_SUITE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("Invalid regex"));
static RE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"));

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {value}")]
    InvalidCharacters { field: &'static str, value: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an expectation suite name.
///
/// # Rules
///
/// - Must not be empty or exceed 255 characters
/// - Letters, digits, `_`, `.` and `-` only, not starting with `.` or `-`
///
/// # Examples
///
/// ```
/// use catalog_ingest_sdk::validation::input::validate_suite_name;
///
/// assert!(validate_suite_name("orders_validation_suite").is_ok());
/// assert!(validate_suite_name("../etc/passwd").is_err());
/// assert!(validate_suite_name("").is_err());
/// ```
pub fn validate_suite_name(name: &str) -> ValidationResult<()> {
    check_length("suite name", name, MAX_SUITE_NAME_LENGTH)?;
    if !RE_SUITE_NAME.is_match(name) {
        return Err(ValidationError::InvalidCharacters {
            field: "suite name",
            value: name.to_string(),
        });
    }
    Ok(())
}

/// Validate a datasource, table, schema or column identifier.
///
/// # Examples
///
/// ```
/// use catalog_ingest_sdk::validation::input::validate_identifier;
///
/// assert!(validate_identifier("table name", "pos_sales").is_ok());
/// assert!(validate_identifier("table name", "pos sales").is_err());
/// ```
pub fn validate_identifier(field: &'static str, value: &str) -> ValidationResult<()> {
    check_length(field, value, MAX_IDENTIFIER_LENGTH)?;
    if !RE_IDENTIFIER.is_match(value) {
        return Err(ValidationError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_length(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}
