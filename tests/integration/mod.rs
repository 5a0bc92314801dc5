//! Integration tests for lumen-ask.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable to run them.

pub mod connection_test;
pub mod fixtures;
pub mod pipeline_test;
pub mod query_test;
