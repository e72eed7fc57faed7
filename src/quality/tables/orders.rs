//! Order table checks

use super::{Target, TableValidation, register_fresh};
use crate::quality::patterns::{PRODUCT_CODE, UK_POSTCODE};
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};
use chrono::NaiveDate;

pub const ORDER_STATUSES: [&str; 5] = ["NEW", "PROCESSING", "SHIPPED", "DELIVERED", "CANCELLED"];

pub struct OrdersValidation;

impl TableValidation for OrdersValidation {
    fn name(&self) -> &'static str {
        "tbl_orders_validation"
    }

    fn suite_name(&self) -> &'static str {
        "orders_validation_suite"
    }

    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        Ok(vec![
            Expectation::not_null("order_id"),
            Expectation::of_type("customer_id", "INTEGER"),
            Expectation::match_regex("product_id", PRODUCT_CODE)?,
            Expectation::between("quantity", Some(Bound::Integer(1)), None).with_strict_min(),
            Expectation::between(
                "order_date",
                NaiveDate::from_ymd_opt(2000, 1, 1).map(Into::into),
                Some(ctx.end_of_year().into()),
            ),
            Expectation::in_set("status", ORDER_STATUSES),
            Expectation::match_regex("shipping_postcode", UK_POSTCODE)?,
        ])
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource("orders_postgres", "postgres", "orders", "orders"),
        )
    }
}
