//! Error types for lumen-ask.
//!
//! Defines the main error enum used throughout the question pipeline.

use thiserror::Error;

/// Main error type for lumen-ask operations.
#[derive(Error, Debug)]
pub enum LumenError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Model endpoint errors (unreachable, non-2xx status, timeouts, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model output that is not JSON or lacks the expected key.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// A single-record query matched no rows.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A single-record query matched more than one row.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Structured query referencing unknown fields, operators, or incompatible values.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Query execution errors raised by the store (syntax, timeouts, undecodable columns).
    #[error("Query error: {0}")]
    Query(String),

    /// The request was cancelled by the caller.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LumenError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a malformed-response error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a conflict error with the given message.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Creates an invalid-query error with the given message.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a cancellation error with the given message.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the error means the store or the model endpoint was unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Llm(_))
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Llm(_) => "LLM Error",
            Self::Malformed(_) => "Malformed Response",
            Self::NotFound(_) => "Not Found",
            Self::Conflict(_) => "Conflict",
            Self::InvalidQuery(_) => "Invalid Query",
            Self::Query(_) => "Query Error",
            Self::Cancelled(_) => "Cancelled",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using LumenError.
pub type Result<T> = std::result::Result<T, LumenError>;
