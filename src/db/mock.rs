//! Mock database clients for testing.
//!
//! Provide canned rows and record every statement they are asked to run.

use super::{DatabaseClient, QueryResult, Row};
use crate::error::{LumenError, Result};
use crate::query::Statement;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined rows for every statement.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    rows: Vec<Row>,
    executed: Mutex<Vec<Statement>>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client that matches no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new mock database client returning the given rows.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns the statements executed so far.
    pub fn executed_statements(&self) -> Vec<Statement> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch_rows(&self, statement: &Statement, max_rows: usize) -> Result<QueryResult> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(statement.clone());
        }

        let was_truncated = self.rows.len() > max_rows;
        let rows = self.rows.iter().take(max_rows).cloned().collect();

        Ok(QueryResult {
            rows,
            execution_time: Duration::from_millis(1),
            was_truncated,
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose server is unreachable.
#[derive(Debug, Default)]
pub struct FailingDatabaseClient;

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch_rows(&self, _statement: &Statement, _max_rows: usize) -> Result<QueryResult> {
        Err(LumenError::connection(
            "Cannot connect to localhost:5432. Check that the server is running.",
        ))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
