//! Registry of validation modules

use super::SuiteError;
use super::context::ValidationContext;
use super::expectation::ValidationRun;
use super::tables::archive::{Customer1Validation, PrisonerV1Validation};
use super::tables::{
    ClientValidation, ErpOrdersValidation, OrdersValidation, PosSalesValidation,
    PrisonerValidation, TableValidation,
};
use tracing::{error, info};

static ACTIVE: &[&dyn TableValidation] = &[
    &ClientValidation,
    &ErpOrdersValidation,
    &OrdersValidation,
    &PosSalesValidation,
    &PrisonerValidation,
];

static ARCHIVED: &[&dyn TableValidation] = &[&Customer1Validation, &PrisonerV1Validation];

fn sorted_names(modules: &[&dyn TableValidation]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = modules.iter().map(|m| m.name()).collect();
    names.sort_unstable();
    names
}

/// Active module names, sorted
pub fn list_validation_modules() -> Vec<&'static str> {
    sorted_names(ACTIVE)
}

/// Archived module names, sorted
pub fn list_archived_modules() -> Vec<&'static str> {
    sorted_names(ARCHIVED)
}

fn lookup(modules: &[&'static dyn TableValidation], name: &str) -> Option<&'static dyn TableValidation> {
    let module_name = if name.starts_with("tbl_") && name.ends_with("_validation") {
        name.to_string()
    } else {
        format!("tbl_{}_validation", name)
    };
    modules.iter().copied().find(|m| m.name() == module_name)
}

/// Find an active module by `tbl_<table>_validation` or bare table name
pub fn find_validation(name: &str) -> Option<&'static dyn TableValidation> {
    lookup(ACTIVE, name)
}

/// Find an archived module
pub fn find_archived_validation(name: &str) -> Option<&'static dyn TableValidation> {
    lookup(ARCHIVED, name)
}

/// Run the named modules in order.
///
/// A failing or unknown module is reported in its slot and the rest still run.
pub fn run_validations(
    ctx: &mut ValidationContext,
    names: &[&str],
) -> Vec<(String, Result<ValidationRun, SuiteError>)> {
    run_from(ACTIVE, ctx, names)
}

/// Run archived modules by name
pub fn run_archived_validations(
    ctx: &mut ValidationContext,
    names: &[&str],
) -> Vec<(String, Result<ValidationRun, SuiteError>)> {
    run_from(ARCHIVED, ctx, names)
}

fn run_from(
    modules: &[&'static dyn TableValidation],
    ctx: &mut ValidationContext,
    names: &[&str],
) -> Vec<(String, Result<ValidationRun, SuiteError>)> {
    names
        .iter()
        .map(|name| {
            let result = match lookup(modules, name) {
                Some(module) => module.run_validation(ctx),
                None => Err(SuiteError::UnknownModule(name.to_string())),
            };
            match &result {
                Ok(run) => info!("Validation module {} registered {}", name, run.suite_name),
                Err(e) => error!("Error in run_validation for {}: {}", name, e),
            }
            (name.to_string(), result)
        })
        .collect()
}
