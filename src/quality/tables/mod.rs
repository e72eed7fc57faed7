//! Per-table validation modules
//!
//! Each module builds the expectation suite for one source table, registers
//! it with the [`ValidationContext`], and describes the batch the suite
//! should run against.

pub mod archive;
pub mod client;
pub mod erp_orders;
pub mod orders;
pub mod pos_sales;
pub mod prisoner;

use super::SuiteError;
use super::context::ValidationContext;
use super::expectation::{BatchRequest, DatasourceConfig, Expectation, ExpectationSuite, ValidationRun};
use crate::validation::validate_identifier;
use tracing::{debug, info};

pub use client::ClientValidation;
pub use erp_orders::ErpOrdersValidation;
pub use orders::OrdersValidation;
pub use pos_sales::PosSalesValidation;
pub use prisoner::PrisonerValidation;

/// Data connector used by every batch request
pub const DEFAULT_DATA_CONNECTOR: &str = "default";

/// Schema every source table lives in
pub const DEFAULT_SCHEMA: &str = "public";

/// A validation module for one table
pub trait TableValidation: Send + Sync {
    /// Module name, `tbl_<table>_validation`
    fn name(&self) -> &'static str;

    fn suite_name(&self) -> &'static str;

    /// The fixed expectation list, in registration order
    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError>;

    /// Register the suite and return the batch it runs against
    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError>;
}

/// Where a suite runs
pub(crate) struct Target {
    pub datasource: Option<DatasourceConfig>,
    pub batch_datasource: &'static str,
    pub data_asset: &'static str,
    pub table: &'static str,
}

impl Target {
    /// Table on a datasource that is described alongside the batch
    pub fn with_datasource(
        name: &'static str,
        database: &'static str,
        data_asset: &'static str,
        table: &'static str,
    ) -> Self {
        Self {
            datasource: Some(DatasourceConfig::new(name, database)),
            batch_datasource: name,
            data_asset,
            table,
        }
    }

    /// Table on an already configured datasource
    pub fn on(batch_datasource: &'static str, data_asset: &'static str, table: &'static str) -> Self {
        Self {
            datasource: None,
            batch_datasource,
            data_asset,
            table,
        }
    }

    fn describe(self, suite_name: &str) -> Result<ValidationRun, SuiteError> {
        if let Some(ds) = &self.datasource {
            debug!("Datasource config: {:?}", ds);
        }
        let batch_request = BatchRequest {
            datasource_name: self.batch_datasource.to_string(),
            data_connector_name: DEFAULT_DATA_CONNECTOR.to_string(),
            data_asset_name: self.data_asset.to_string(),
            table_name: self.table.to_string(),
            schema_name: DEFAULT_SCHEMA.to_string(),
        };
        debug!("Batch request config: {:?}", batch_request);

        let run = ValidationRun {
            batch_request,
            suite_name: suite_name.to_string(),
            datasource: self.datasource,
        }
        .verify()?;

        validate_identifier("table name", &run.batch_request.table_name)?;
        validate_identifier("schema name", &run.batch_request.schema_name)?;
        Ok(run)
    }
}

/// Build a fresh suite from the module's expectations and overwrite the stored one
pub(crate) fn register_fresh(
    module: &dyn TableValidation,
    ctx: &mut ValidationContext,
    target: Target,
) -> Result<ValidationRun, SuiteError> {
    let suite_name = module.suite_name();
    info!("Creating suite: {}", suite_name);

    let mut suite = ExpectationSuite::new(suite_name);
    suite.extend(module.expectations(ctx)?);
    ctx.register_suite(&suite)?;

    target.describe(suite_name)
}

/// Reuse the stored suite, adding only expectations it does not already hold
pub(crate) fn register_merged(
    module: &dyn TableValidation,
    ctx: &mut ValidationContext,
    target: Target,
) -> Result<ValidationRun, SuiteError> {
    let suite_name = module.suite_name();
    let mut suite = ctx.get_or_create_suite(suite_name)?;

    let added = module
        .expectations(ctx)?
        .into_iter()
        .filter(|e| suite.add_expectation_if_absent(e.clone()))
        .count();
    debug!("Added {} expectations to {}", added, suite_name);
    ctx.register_suite(&suite)?;

    target.describe(suite_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_fills_defaults() {
        let run = Target::with_datasource("ds", "db", "asset", "tbl")
            .describe("suite")
            .unwrap();
        assert_eq!(run.batch_request.data_connector_name, "default");
        assert_eq!(run.batch_request.schema_name, "public");
        assert_eq!(run.batch_request.datasource_name, "ds");
        assert_eq!(run.datasource, Some(DatasourceConfig::new("ds", "db")));
    }

    #[test]
    fn test_describe_rejects_empty_values() {
        let err = Target::on("", "asset", "tbl").describe("suite").unwrap_err();
        assert!(matches!(err, SuiteError::EmptyDescriptor("datasource_name")));
    }

    #[test]
    fn test_describe_rejects_bad_table_identifier() {
        let err = Target::on("ds", "asset", "bad table").describe("suite").unwrap_err();
        assert!(matches!(err, SuiteError::InvalidName(_)));
    }
}
