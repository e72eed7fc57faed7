//! First revision of the prisoner checks, with its own datasource

use crate::quality::patterns::{NON_NUMERIC, PERSONAL_IDENTIFIER};
use crate::quality::tables::{Target, TableValidation, register_fresh};
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};

pub struct PrisonerV1Validation;

impl TableValidation for PrisonerV1Validation {
    fn name(&self) -> &'static str {
        "tbl_prisoner_validation"
    }

    fn suite_name(&self) -> &'static str {
        "prisoner_validation_suite"
    }

    fn expectations(&self, _ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        Ok(vec![
            Expectation::between("cell_num", Some(Bound::Integer(1)), Some(Bound::Integer(600))),
            Expectation::between("prisoner_id", Some(Bound::Integer(0)), None),
            Expectation::match_regex("first_name", NON_NUMERIC)?,
            Expectation::not_null("prisoner_id"),
            Expectation::not_null("first_name"),
            Expectation::not_null("cell_num"),
            Expectation::unique("persona_identifier"),
            Expectation::match_regex("persona_identifier", PERSONAL_IDENTIFIER)?,
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource("prisons_demo", "prisons_demo", "prisoner", "prisoner"),
        )
    }
}
