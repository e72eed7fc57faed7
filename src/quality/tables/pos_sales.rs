//! Point-of-sale table checks

use super::{Target, TableValidation, register_fresh};
use crate::quality::patterns::{PRODUCT_CODE, SHORT_CODE};
use crate::quality::{Bound, Expectation, SuiteError, ValidationContext, ValidationRun};
use chrono::NaiveDate;

pub const TRANSACTION_STATUSES: [&str; 3] = ["COMPLETED", "CANCELLED", "PENDING"];

pub struct PosSalesValidation;

impl TableValidation for PosSalesValidation {
    fn name(&self) -> &'static str {
        "tbl_pos_sales_validation"
    }

    fn suite_name(&self) -> &'static str {
        "pos_sales_validation_suite"
    }

    fn expectations(&self, ctx: &ValidationContext) -> Result<Vec<Expectation>, SuiteError> {
        let mut expectations = vec![
            Expectation::not_null("pos_transaction_id"),
            Expectation::of_type("pos_customer_id", "INTEGER"),
            Expectation::match_regex("pos_sku", PRODUCT_CODE)?,
            Expectation::between("sale_quantity", Some(Bound::Integer(1)), None).with_strict_min(),
            Expectation::between("item_price", Some(Bound::Integer(0)), None),
            Expectation::between(
                "transaction_date",
                NaiveDate::from_ymd_opt(2000, 1, 1).map(Into::into),
                Some(ctx.end_of_year().into()),
            ),
            Expectation::in_set("transaction_status", TRANSACTION_STATUSES),
        ];
        for column in ["store_id", "register_id", "staff_id"] {
            expectations.push(Expectation::match_regex(column, SHORT_CODE)?);
        }
        Ok(expectations)
    }

    fn run_validation(&self, ctx: &mut ValidationContext) -> Result<ValidationRun, SuiteError> {
        register_fresh(
            self,
            ctx,
            Target::with_datasource("pos_sales_postgres", "postgres", "pos_sales", "pos_sales"),
        )
    }
}
