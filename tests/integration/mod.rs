//! Integration tests for the SQL sandbox.

pub mod common;
pub mod console_test;
pub mod query_test;
pub mod records_test;
pub mod seed_test;
