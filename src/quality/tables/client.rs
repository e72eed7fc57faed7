//! Client table checks

use super::{Target, TableValidation, register_fresh};
use crate::quality::patterns::{EMAIL, ISO_COUNTRY_CODES, NINO, UK_PHONE, UK_POSTCODE};
use crate::quality::{Expectation, SuiteError, ValidationContext, ValidationRun};
use chrono::NaiveDate;

pub struct ClientValidation;

impl TableValidation for ClientValidation {
    fn name(&self) -> &'static str {
        "tbl_client_validation"
    }

    fn suite_name(&self) -> &'static str {
        "client_validation_suite"
    }

    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        Ok(vec![
            Expectation::not_null("client_id"),
            Expectation::match_regex("email_address", EMAIL)?,
            Expectation::not_null("email_address"),
            Expectation::between(
                "date_of_birth",
                NaiveDate::from_ymd_opt(1900, 1, 1).map(Into::into),
                Some(ctx.end_of_year().into()),
            ),
            Expectation::not_null("first_name"),
            Expectation::in_set("country", ISO_COUNTRY_CODES.iter().copied()),
            Expectation::match_regex("postcode", UK_POSTCODE)?,
            Expectation::match_regex("national_insurance_number", NINO)?,
            Expectation::match_regex("phone_number", UK_PHONE)?,
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource("client_postgres", "postgres", "client", "client"),
        )
    }
}
