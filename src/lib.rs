//! commerce-fixtures - test-data seeding and workflow drivers
//!
//! Disposable tooling for a single commerce platform instance:
//! bulk queue-message rows written straight into the database, bulk catalog
//! products created through the REST admin API, and a guest checkout driven
//! end to end over GraphQL.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod platform;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
pub mod seeder;
pub mod utils;
