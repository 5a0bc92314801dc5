//! Connection integration tests.
//!
//! Tests database connectivity and error handling.

use lumen_ask::config::ConnectionConfig;
use lumen_ask::db::{DatabaseClient, PostgresClient, Value};
use lumen_ask::error::LumenError;
use lumen_ask::query::Statement;
use std::time::Duration;

use super::fixtures::get_test_database_url;

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresClient> {
    let url = get_test_database_url()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresClient::connect(&config).await.ok()
}

#[tokio::test]
async fn test_connect_with_valid_credentials() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let statement = Statement {
        sql: "SELECT 1::INT4 AS num".to_string(),
        args: vec![],
    };
    let result = client.fetch_rows(&statement, 10).await.unwrap();

    assert_eq!(result.rows, vec![vec![Value::Int(1)]]);
    assert!(result.execution_time > Duration::ZERO);
    client.close().await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn test_connect_with_invalid_host() {
    let config = ConnectionConfig {
        host: Some("invalid.host.that.does.not.exist.local".to_string()),
        port: 5432,
        database: Some("testdb".to_string()),
        user: Some("testuser".to_string()),
        password: Some("testpass".to_string()),
    };

    let result = PostgresClient::connect(&config).await;

    let error = result.unwrap_err();
    assert!(error.is_connectivity());
    assert!(matches!(error, LumenError::Connection(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn test_connect_without_database_name() {
    let config = ConnectionConfig {
        host: Some("localhost".to_string()),
        ..Default::default()
    };

    let result = PostgresClient::connect(&config).await;

    assert!(matches!(result, Err(LumenError::Config(_))));
}

#[tokio::test]
async fn test_server_error_is_query_error() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let statement = Statement {
        sql: "SELECT missing_column FROM pg_catalog.pg_class".to_string(),
        args: vec![],
    };
    let error = client.fetch_rows(&statement, 10).await.unwrap_err();

    assert!(matches!(error, LumenError::Query(_)));
    assert!(error.to_string().contains("missing_column"));
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_statement_timeout_is_connectivity_error() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let client = client.with_query_timeout(Duration::from_millis(200));

    let statement = Statement {
        sql: "SELECT pg_sleep(2)".to_string(),
        args: vec![],
    };
    let error = client.fetch_rows(&statement, 10).await.unwrap_err();

    assert!(matches!(error, LumenError::Connection(_)));
    assert!(error.is_connectivity());
    assert!(error.to_string().contains("timed out"));
    client.close().await.unwrap();
}
