//! Parameterized SQL generation for structured queries.
//!
//! Values are never spliced into statement text; every filter value becomes a
//! positional `$n` argument.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{FieldCatalog, FieldKind};
use crate::error::Result;
use crate::query::types::{Operator, StructuredQuery};

/// A positional statement argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlArg {
    /// Numbers are bound as REAL so they compare exactly against REAL columns.
    Real(f32),
    Text(String),
    Date(NaiveDate),
}

/// Statement text together with its positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

/// Builds statements for queries against a catalog's relation.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    catalog: &'a FieldCatalog,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder over the given catalog.
    pub fn new(catalog: &'a FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Builds the statement for a query.
    ///
    /// The whole query is validated against the catalog before any text is
    /// assembled, so an unknown field or incompatible value fails with
    /// `InvalidQuery` and never reaches the store.
    pub fn build(&self, query: &StructuredQuery) -> Result<Statement> {
        self.catalog.check_return_fields(&query.return_fields)?;
        let resolved = query
            .filters
            .iter()
            .map(|clause| self.catalog.resolve_filter(clause))
            .collect::<Result<Vec<_>>>()?;

        let mut sql = format!(
            "SELECT {} FROM {}",
            query.return_fields.join(", "),
            self.catalog.relation()
        );

        let mut args = Vec::with_capacity(resolved.len());
        let mut predicates = Vec::with_capacity(resolved.len());
        for (i, (clause, (kind, arg))) in query.filters.iter().zip(resolved).enumerate() {
            predicates.push(predicate(&clause.field, clause.operator, kind, i + 1));
            args.push(arg);
        }

        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        Ok(Statement { sql, args })
    }
}

/// Renders one predicate with its placeholder.
///
/// Equality on a JSONB string array is a membership test (`?`), since the
/// column holds a serialized list rather than a scalar.
fn predicate(field: &str, operator: Operator, kind: FieldKind, position: usize) -> String {
    match (operator, kind) {
        (Operator::Eq, FieldKind::StringList) => format!("{field} ? ${position}"),
        _ => format!("{field} {} ${position}", operator.sql_token()),
    }
}
