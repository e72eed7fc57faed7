//! Retired validation modules
//!
//! Kept so their suites can still be rebuilt on request. They are never
//! run by default.

pub mod customer_1;
pub mod prisoner;

pub use customer_1::Customer1Validation;
pub use prisoner::PrisonerV1Validation;
