//! Tests for the table validation modules and suite stores

use catalog_ingest_sdk::quality::patterns::{ISO_COUNTRY_CODES, UK_POSTCODE};
use catalog_ingest_sdk::quality::registry::{find_archived_validation, run_archived_validations};
use catalog_ingest_sdk::quality::{
    Bound, DatasourceConfig, Expectation, FileSuiteStore, SuiteStore, ValidationContext,
    find_validation, list_validation_modules, run_validations,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn context() -> ValidationContext {
    ValidationContext::in_memory().with_reference_date(date(2025, 6, 15))
}

fn types_and_columns(ctx: &ValidationContext, suite: &str) -> Vec<(String, String)> {
    ctx.store()
        .get_suite(suite)
        .unwrap()
        .unwrap()
        .expectations
        .iter()
        .map(|e| (e.expectation_type().to_string(), e.column().to_string()))
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(t, c)| (format!("expect_column_values_to_{}", t), c.to_string()))
        .collect()
}

#[test]
fn test_client_suite() {
    let mut ctx = context();
    let run = find_validation("client").unwrap().run_validation(&mut ctx).unwrap();

    assert_eq!(run.suite_name, "client_validation_suite");
    assert_eq!(
        run.datasource,
        Some(DatasourceConfig::new("client_postgres", "postgres"))
    );
    assert_eq!(run.batch_request.datasource_name, "client_postgres");
    assert_eq!(run.batch_request.data_asset_name, "client");
    assert_eq!(run.batch_request.table_name, "client");

    assert_eq!(
        types_and_columns(&ctx, "client_validation_suite"),
        pairs(&[
            ("not_be_null", "client_id"),
            ("match_regex", "email_address"),
            ("not_be_null", "email_address"),
            ("be_between", "date_of_birth"),
            ("not_be_null", "first_name"),
            ("be_in_set", "country"),
            ("match_regex", "postcode"),
            ("match_regex", "national_insurance_number"),
            ("match_regex", "phone_number"),
        ])
    );

    let suite = ctx.store().get_suite("client_validation_suite").unwrap().unwrap();
    assert_eq!(
        suite.expectations[3],
        Expectation::between(
            "date_of_birth",
            Some(Bound::Date(date(1900, 1, 1))),
            Some(Bound::Date(date(2025, 12, 31)))
        )
    );
    assert_eq!(
        suite.expectations[5],
        Expectation::in_set("country", ISO_COUNTRY_CODES.iter().copied())
    );
    assert_eq!(
        suite.expectations[6],
        Expectation::match_regex("postcode", UK_POSTCODE).unwrap()
    );
}

#[test]
fn test_erp_orders_suite() {
    let mut ctx = context();
    let run = find_validation("erp_orders").unwrap().run_validation(&mut ctx).unwrap();
    assert_eq!(run.batch_request.table_name, "erp_orders");
    assert_eq!(run.datasource.unwrap().name, "erp_orders_postgres");

    let suite = ctx.store().get_suite("erp_orders_validation_suite").unwrap().unwrap();
    assert_eq!(suite.len(), 8);
    assert_eq!(
        suite.expectations[3].to_configuration()["kwargs"],
        serde_json::json!({"column": "order_qty", "min_value": 1, "strict_min": true})
    );
    assert_eq!(
        suite.expectations[4].to_configuration()["kwargs"],
        serde_json::json!({"column": "unit_cost", "min_value": 0})
    );
    assert_eq!(
        suite.expectations[6],
        Expectation::in_set("order_status", ["PENDING", "SHIPPED", "DELIVERED", "CANCELLED"])
    );
}

#[test]
fn test_orders_suite() {
    let mut ctx = context();
    find_validation("tbl_orders_validation")
        .unwrap()
        .run_validation(&mut ctx)
        .unwrap();

    assert_eq!(
        types_and_columns(&ctx, "orders_validation_suite"),
        pairs(&[
            ("not_be_null", "order_id"),
            ("be_of_type", "customer_id"),
            ("match_regex", "product_id"),
            ("be_between", "quantity"),
            ("be_between", "order_date"),
            ("be_in_set", "status"),
            ("match_regex", "shipping_postcode"),
        ])
    );
}

#[test]
fn test_pos_sales_suite() {
    let mut ctx = context();
    let run = find_validation("pos_sales").unwrap().run_validation(&mut ctx).unwrap();
    assert_eq!(run.batch_request.schema_name, "public");
    assert_eq!(run.batch_request.data_connector_name, "default");

    let suite = ctx.store().get_suite("pos_sales_validation_suite").unwrap().unwrap();
    assert_eq!(suite.len(), 10);
    let short_codes: Vec<&str> = suite.expectations[7..].iter().map(|e| e.column()).collect();
    assert_eq!(short_codes, vec!["store_id", "register_id", "staff_id"]);
    assert_eq!(
        suite.expectations[5].to_configuration()["kwargs"]["max_value"],
        "2025-12-31"
    );
}

#[test]
fn test_prisoner_suite_has_no_datasource() {
    let mut ctx = context();
    let run = find_validation("prisoner").unwrap().run_validation(&mut ctx).unwrap();
    assert_eq!(run.datasource, None);
    assert_eq!(run.batch_request.datasource_name, "prisons_demo");

    assert_eq!(
        types_and_columns(&ctx, "prisoner_validation_suite"),
        pairs(&[
            ("be_between", "cell_num"),
            ("be_between", "prisoner_id"),
            ("match_regex", "first_name"),
        ])
    );
}

#[test]
fn test_rerun_overwrites_suite() {
    let mut ctx = context();
    let module = find_validation("orders").unwrap();
    module.run_validation(&mut ctx).unwrap();
    module.run_validation(&mut ctx).unwrap();
    assert_eq!(
        ctx.store().get_suite("orders_validation_suite").unwrap().unwrap().len(),
        7
    );
}

#[test]
fn test_archived_modules() {
    let mut ctx = context();
    let results = run_archived_validations(&mut ctx, &["customer_1", "prisoner"]);
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    let customer = results[0].1.as_ref().unwrap();
    assert_eq!(customer.batch_request.table_name, "customers_test_data_1");
    let suite = ctx.store().get_suite("customer_1_validation_suite").unwrap().unwrap();
    assert_eq!(suite.len(), 7);
    assert_eq!(
        suite.expectations[4].to_configuration()["kwargs"]["max_value"],
        "2025-06-15"
    );

    let prisoner = results[1].1.as_ref().unwrap();
    assert_eq!(
        prisoner.datasource,
        Some(DatasourceConfig::new("prisons_demo", "prisons_demo"))
    );
    let suite = ctx.store().get_suite("prisoner_validation_suite").unwrap().unwrap();
    assert_eq!(suite.len(), 8);
    assert!(suite.expectations.contains(&Expectation::unique("persona_identifier")));
    assert!(find_archived_validation("tbl_customer_1_validation").is_some());
}

#[test]
fn test_run_all_into_file_store() {
    let dir = tempdir().unwrap();
    let mut ctx = ValidationContext::new(Box::new(FileSuiteStore::new(dir.path())))
        .with_reference_date(date(2025, 1, 1));

    let modules = list_validation_modules();
    let results = run_validations(&mut ctx, &modules);
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    let store = FileSuiteStore::new(dir.path());
    assert_eq!(
        store.list_suites().unwrap(),
        vec![
            "client_validation_suite",
            "erp_orders_validation_suite",
            "orders_validation_suite",
            "pos_sales_validation_suite",
            "prisoner_validation_suite",
        ]
    );

    let raw: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("expectations/client_validation_suite.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(raw["expectation_suite_name"], "client_validation_suite");
    assert_eq!(raw["expectations"].as_array().unwrap().len(), 9);
    assert!(raw["data_asset_type"].is_null());
}
