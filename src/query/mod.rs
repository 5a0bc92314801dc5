//! Structured queries: the query DSL, statement building, and execution.
//!
//! This module isolates the intermediate representation and its translation to
//! parameterized SQL from the LLM protocol around it.

pub mod builder;
pub mod executor;
pub mod types;

pub use builder::{QueryBuilder, SqlArg, Statement};
pub use executor::{QueryExecutor, QueryOutput, ResultRow};
pub use types::{Cardinality, FilterClause, FilterValue, Operator, StructuredQuery};
