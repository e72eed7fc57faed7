//! Format converter module
//!
//! Provides the mapping from DCAT catalog records to DataHub metadata events.

pub mod dcat;

pub use dcat::{transform_catalog, transform_dcat_to_mce, transform_distribution_to_properties};
