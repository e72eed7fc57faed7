//! Execution context passed to validation modules

use super::SuiteError;
use super::expectation::ExpectationSuite;
use super::store::{InMemorySuiteStore, SuiteStore};
use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

/// Holds the suite store and the date used for open-ended date bounds
pub struct ValidationContext {
    store: Box<dyn SuiteStore>,
    reference_date: NaiveDate,
}

impl ValidationContext {
    /// Context over a store, dated today
    pub fn new(store: Box<dyn SuiteStore>) -> Self {
        Self {
            store,
            reference_date: Local::now().date_naive(),
        }
    }

    /// Context with an in-memory store
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemorySuiteStore::new()))
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// 31 December of the reference year
    pub fn end_of_year(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.reference_date.year(), 12, 31).unwrap_or(self.reference_date)
    }

    pub fn store(&self) -> &dyn SuiteStore {
        self.store.as_ref()
    }

    /// Register a suite, replacing any existing suite of the same name
    pub fn register_suite(&mut self, suite: &ExpectationSuite) -> Result<(), SuiteError> {
        debug!("Registering suite: {}", suite.name);
        self.store.save_suite(suite)
    }

    /// Fetch a stored suite, or start an empty one
    pub fn get_or_create_suite(&self, name: &str) -> Result<ExpectationSuite, SuiteError> {
        match self.store.get_suite(name)? {
            Some(suite) => {
                debug!("Loaded existing suite: {}", name);
                Ok(suite)
            }
            None => {
                debug!("Creating suite: {}", name);
                Ok(ExpectationSuite::new(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Expectation;

    #[test]
    fn test_end_of_year() {
        let ctx = ValidationContext::in_memory()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(ctx.end_of_year(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_register_overwrites() {
        let mut ctx = ValidationContext::in_memory();
        let mut suite = ExpectationSuite::new("s");
        ctx.register_suite(&suite).unwrap();
        suite.add_expectation(Expectation::not_null("id"));
        ctx.register_suite(&suite).unwrap();
        assert_eq!(ctx.store().get_suite("s").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_get_or_create() {
        let mut ctx = ValidationContext::in_memory();
        assert!(ctx.get_or_create_suite("fresh").unwrap().is_empty());

        let mut suite = ExpectationSuite::new("kept");
        suite.add_expectation(Expectation::unique("id"));
        ctx.register_suite(&suite).unwrap();
        assert_eq!(ctx.get_or_create_suite("kept").unwrap(), suite);
    }
}
