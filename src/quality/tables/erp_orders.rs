//! ERP order table checks

use super::{Target, TableValidation, register_fresh};
use crate::quality::patterns::{PRODUCT_CODE, UK_POSTCODE};
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};
use chrono::NaiveDate;

pub const ORDER_STATUSES: [&str; 4] = ["PENDING", "SHIPPED", "DELIVERED", "CANCELLED"];

pub struct ErpOrdersValidation;

impl TableValidation for ErpOrdersValidation {
    fn name(&self) -> &'static str {
        "tbl_erp_orders_validation"
    }

    fn suite_name(&self) -> &'static str {
        "erp_orders_validation_suite"
    }

    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        Ok(vec![
            Expectation::not_null("erp_order_number"),
            Expectation::of_type("erp_customer_reference", "INTEGER"),
            Expectation::match_regex("erp_product_code", PRODUCT_CODE)?,
            Expectation::between("order_qty", Some(Bound::Integer(1)), None).with_strict_min(),
            Expectation::between("unit_cost", Some(Bound::Integer(0)), None),
            Expectation::between(
                "order_creation_date",
                NaiveDate::from_ymd_opt(2000, 1, 1).map(Into::into),
                Some(ctx.end_of_year().into()),
            ),
            Expectation::in_set("order_status", ORDER_STATUSES),
            Expectation::match_regex("delivery_postcode", UK_POSTCODE)?,
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource("erp_orders_postgres", "postgres", "erp_orders", "erp_orders"),
        )
    }
}
