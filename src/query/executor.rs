//! Structured query execution.
//!
//! Runs built statements through a `DatabaseClient` and decodes each row into
//! a field-to-value mapping keyed by the query's return fields.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::catalog::{FieldCatalog, FieldKind};
use crate::db::{DatabaseClient, Row, Value};
use crate::error::{LumenError, Result};
use crate::query::builder::{QueryBuilder, Statement};
use crate::query::types::{Cardinality, StructuredQuery};

/// One matched record, keyed by return field in projection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    fields: Vec<(String, Value)>,
}

impl ResultRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an earlier value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Returns the field names in projection order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Result of a structured query, shaped by its cardinality.
///
/// Serializes as a JSON object for `One` and a JSON array for `Many`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    One(ResultRow),
    Many(Vec<ResultRow>),
}

impl QueryOutput {
    /// Returns the number of records.
    pub fn row_count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(rows) => rows.len(),
        }
    }

    /// Serializes the result to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| LumenError::internal(format!("could not serialize result: {e}")))
    }
}

/// Executes structured queries against a database client.
pub struct QueryExecutor<'a> {
    db: &'a dyn DatabaseClient,
    catalog: &'a FieldCatalog,
    max_rows: usize,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(db: &'a dyn DatabaseClient, catalog: &'a FieldCatalog, max_rows: usize) -> Self {
        Self {
            db,
            catalog,
            max_rows,
        }
    }

    /// Builds a query and runs it according to its cardinality.
    pub async fn execute(&self, query: &StructuredQuery) -> Result<QueryOutput> {
        let statement = QueryBuilder::new(self.catalog).build(query)?;
        debug!(
            sql = %statement.sql,
            arg_count = statement.args.len(),
            cardinality = query.cardinality.as_str(),
            "Built statement"
        );

        match query.cardinality {
            Cardinality::One => self
                .query_one(&statement, &query.return_fields)
                .await
                .map(QueryOutput::One),
            Cardinality::Many => self
                .query_many(&statement, &query.return_fields)
                .await
                .map(QueryOutput::Many),
        }
    }

    /// Runs a statement that must match exactly one record.
    ///
    /// Zero rows is `NotFound`; more than one row is `Conflict`.
    pub async fn query_one(
        &self,
        statement: &Statement,
        return_fields: &[String],
    ) -> Result<ResultRow> {
        let result = self.db.fetch_rows(statement, 2).await?;

        debug!(
            duration_ms = result.execution_time.as_millis() as u64,
            row_count = result.row_count(),
            "Fetched single-record query"
        );

        let mut rows = result.rows.into_iter();
        match (rows.next(), rows.next()) {
            (None, _) => Err(LumenError::not_found("no product matched the query")),
            (Some(row), None) => self.decode_row(row, return_fields),
            (Some(_), Some(_)) => Err(LumenError::conflict(
                "more than one product matched a query that expects a single product",
            )),
        }
    }

    /// Runs a statement and decodes every matched record in result order.
    ///
    /// An empty result is a valid outcome.
    pub async fn query_many(
        &self,
        statement: &Statement,
        return_fields: &[String],
    ) -> Result<Vec<ResultRow>> {
        let result = self.db.fetch_rows(statement, self.max_rows).await?;

        debug!(
            duration_ms = result.execution_time.as_millis() as u64,
            row_count = result.row_count(),
            "Fetched multi-record query"
        );

        if result.was_truncated {
            warn!(
                max_rows = self.max_rows,
                "Result truncated to the configured row limit"
            );
        }

        result
            .rows
            .into_iter()
            .map(|row| self.decode_row(row, return_fields))
            .collect()
    }

    /// Maps positional columns onto return fields, decoding list fields.
    fn decode_row(&self, row: Row, return_fields: &[String]) -> Result<ResultRow> {
        if row.len() != return_fields.len() {
            return Err(LumenError::query(format!(
                "expected {} columns, got {}",
                return_fields.len(),
                row.len()
            )));
        }

        return_fields
            .iter()
            .zip(row)
            .map(|(name, value)| -> Result<(&str, Value)> {
                let kind = self.catalog.kind_of(name)?;
                Ok((name.as_str(), decode_column(name, kind, value)?))
            })
            .collect()
    }
}

/// Decodes a stored column into its native value.
///
/// List fields become arrays of strings whether the store hands back a JSON
/// array or its serialized text.
fn decode_column(name: &str, kind: FieldKind, value: Value) -> Result<Value> {
    match (kind, value) {
        (_, Value::Null) => Ok(Value::Null),
        (FieldKind::StringList, Value::List(items)) => Ok(Value::List(items)),
        (FieldKind::StringList, Value::Json(json)) => json_to_list(name, json),
        (FieldKind::StringList, Value::String(text)) => {
            let json = serde_json::from_str(&text).map_err(|e| {
                LumenError::query(format!("column '{name}' is not a JSON array: {e}"))
            })?;
            json_to_list(name, json)
        }
        (FieldKind::StringList, other) => Err(LumenError::query(format!(
            "column '{name}' holds {other}, expected a list of strings"
        ))),
        (FieldKind::Scalar(_), Value::Json(json)) => Ok(json_to_scalar(json)),
        (FieldKind::Scalar(_), other) => Ok(other),
    }
}

fn json_to_list(name: &str, json: serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::String(text) => {
            let json = serde_json::from_str(&text).map_err(|e| {
                LumenError::query(format!("column '{name}' is not a JSON array: {e}"))
            })?;
            json_to_list(name, json)
        }
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(LumenError::query(format!(
                    "column '{name}' contains non-string element {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        other => Err(LumenError::query(format!(
            "column '{name}' holds {other}, expected a list of strings"
        ))),
    }
}

fn json_to_scalar(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        other => Value::Json(other),
    }
}
