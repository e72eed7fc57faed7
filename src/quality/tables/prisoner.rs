//! Prisoner table checks
//!
//! Unlike the other modules this one extends the stored suite instead of
//! replacing it, and runs on the preconfigured `prisons_demo` datasource.

use super::{Target, TableValidation, register_merged};
use crate::quality::patterns::NON_NUMERIC;
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};

pub struct PrisonerValidation;

impl TableValidation for PrisonerValidation {
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
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_merged(self, ctx, Target::on("prisons_demo", "prisoner", "prisoner"))
    }
}
