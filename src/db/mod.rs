//! Database abstraction layer for lumen-ask.
//!
//! Provides a trait-based interface for running built statements, allowing the
//! PostgreSQL store to be swapped for test doubles.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use types::{QueryResult, Row, Value};

use crate::config::{ConnectionConfig, QueryConfig};
use crate::error::Result;
use crate::query::Statement;
use async_trait::async_trait;

/// Creates a database client for the given configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(
    config: &ConnectionConfig,
    query: &QueryConfig,
) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::connect(config)
        .await?
        .with_query_timeout(query.timeout());
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// All operations are async, read-only, and return Results with LumenError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Runs a statement with its positional arguments.
    ///
    /// At most `max_rows` rows are returned; `was_truncated` is set when more matched.
    async fn fetch_rows(&self, statement: &Statement, max_rows: usize) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
