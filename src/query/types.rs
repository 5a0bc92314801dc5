//! Structured query types.
//!
//! The intermediate representation between a natural-language question and an
//! executable statement. The serde shape is the exact JSON the translator asks
//! the model to return, and decoding is strict: unknown keys, operators, or
//! cardinalities are rejected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Whether a query expects exactly one record or any number of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one matching record is expected.
    One,
    /// Any number of matching records, including none.
    Many,
}

impl Cardinality {
    /// Returns the cardinality as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Many => "many",
        }
    }
}

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    Gt,
    Lt,
}

impl Operator {
    /// Returns the operator as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Lt => "lt",
        }
    }

    /// Returns the SQL comparator for scalar columns.
    pub fn sql_token(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal compared against a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Returns a short name of the value type for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// A single predicate. Clauses of a query are joined with `AND`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterClause {
    /// Catalog field the predicate applies to.
    pub field: String,

    /// Comparison operator.
    #[serde(rename = "op")]
    pub operator: Operator,

    /// Value compared against the field.
    pub value: FilterValue,
}

impl FilterClause {
    /// Creates a new filter clause.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// A structured query against the product relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredQuery {
    /// Expected number of matching records.
    #[serde(rename = "type")]
    pub cardinality: Cardinality,

    /// AND-joined predicates, in order. Empty means unconstrained.
    #[serde(rename = "where", default, deserialize_with = "null_as_empty")]
    pub filters: Vec<FilterClause>,

    /// Fields to project, in order.
    pub return_fields: Vec<String>,
}

impl StructuredQuery {
    /// Creates a query expecting exactly one record.
    pub fn one(filters: Vec<FilterClause>, return_fields: &[&str]) -> Self {
        Self::new(Cardinality::One, filters, return_fields)
    }

    /// Creates a query expecting any number of records.
    pub fn many(filters: Vec<FilterClause>, return_fields: &[&str]) -> Self {
        Self::new(Cardinality::Many, filters, return_fields)
    }

    fn new(cardinality: Cardinality, filters: Vec<FilterClause>, return_fields: &[&str]) -> Self {
        Self {
            cardinality,
            filters,
            return_fields: return_fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Accepts `"where": null` as an empty filter list.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<FilterClause>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FilterClause>>::deserialize(deserializer)?.unwrap_or_default())
}
