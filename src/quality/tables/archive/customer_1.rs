//! First customer extract checks

use crate::quality::patterns::EMAIL;
use crate::quality::tables::{Target, TableValidation, register_fresh};
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};
use chrono::NaiveDate;

pub struct Customer1Validation;

impl TableValidation for Customer1Validation {
    fn name(&self) -> &'static str {
        "tbl_customer_1_validation"
    }

    fn suite_name(&self) -> &'static str {
        "customer_1_validation_suite"
    }

    /// Signup dates are capped at the reference date itself, not year end
    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        Ok(vec![
            Expectation::not_null("id"),
            Expectation::between("age", Some(Bound::Integer(0)), None),
            Expectation::match_regex("email", EMAIL)?,
            Expectation::not_null("email"),
            Expectation::between(
                "signup_date",
                NaiveDate::from_ymd_opt(1900, 1, 1).map(Into::into),
                Some(ctx.reference_date().into()),
            ),
            Expectation::not_null("signup_date"),
            Expectation::not_null("name"),
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource(
                "customers_postgres",
                "postgres",
                "customer_1",
                "customers_test_data_1",
            ),
        )
    }
}
