//! Expectation suite command handlers

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::quality::registry::{run_archived_validations, run_validations};
use crate::quality::{
    FileSuiteStore, ValidationContext, list_archived_modules, list_validation_modules,
};
use serde_json::json;
use std::path::PathBuf;

/// Arguments for `suites run`
#[derive(Debug, Clone, Default)]
pub struct SuitesRunArgs {
    pub names: Vec<String>,
    pub all: bool,
    pub archived: bool,
    pub store_dir: Option<PathBuf>,
    pub config_dir: PathBuf,
}

/// Print available validation modules
pub fn handle_suites_list(archived: bool) -> Result<(), CliError> {
    let modules = if archived {
        list_archived_modules()
    } else {
        list_validation_modules()
    };
    for name in modules {
        println!("{}", name);
    }
    Ok(())
}

/// Run validation modules against the file suite store
pub fn handle_suites_run(args: &SuitesRunArgs) -> Result<(), CliError> {
    let names: Vec<String> = match (args.all, args.names.is_empty()) {
        (true, _) => {
            let modules = if args.archived {
                list_archived_modules()
            } else {
                list_validation_modules()
            };
            modules.into_iter().map(str::to_string).collect()
        }
        (false, false) => args.names.clone(),
        (false, true) => {
            return Err(CliError::InvalidArgument(
                "Specify validation modules to run or pass --all".to_string(),
            ));
        }
    };

    let store_dir = match args.store_dir {
        Some(ref dir) => dir.clone(),
        None => load_config(&args.config_dir)?.store_path(&args.config_dir),
    };
    let mut ctx = ValidationContext::new(Box::new(FileSuiteStore::new(&store_dir)));

    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let results = if args.archived {
        run_archived_validations(&mut ctx, &refs)
    } else {
        run_validations(&mut ctx, &refs)
    };

    let total = results.len();
    let mut failed = 0;
    for (name, result) in results {
        match result {
            Ok(run) => {
                let doc = json!({
                    "module": name,
                    "suite_name": run.suite_name,
                    "datasource": run.datasource,
                    "batch_request": run.batch_request,
                });
                let text = serde_json::to_string_pretty(&doc)
                    .map_err(|e| CliError::OutputError(e.to_string()))?;
                println!("{}", text);
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error in run_validation for {}: {}", name, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ValidationFailures(failed, total));
    }
    Ok(())
}
