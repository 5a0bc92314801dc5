//! Question-to-query translation.
//!
//! Asks the model for a structured query in JSON mode and decodes it strictly:
//! anything that is not exactly the expected shape is rejected, never repaired.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::error::{LumenError, Result};
use crate::llm::prompt::build_translator_messages;
use crate::llm::types::ResponseFormat;
use crate::llm::LlmClient;
use crate::query::StructuredQuery;

/// Key of the envelope object wrapping the structured query.
const QUERY_KEY: &str = "query";

/// Translates natural-language questions into structured queries.
pub struct QueryTranslator {
    llm: Arc<dyn LlmClient>,
    catalog: &'static FieldCatalog,
}

impl QueryTranslator {
    /// Creates a translator over the given model client and catalog.
    pub fn new(llm: Arc<dyn LlmClient>, catalog: &'static FieldCatalog) -> Self {
        Self { llm, catalog }
    }

    /// Returns the catalog queries are validated against.
    pub fn catalog(&self) -> &'static FieldCatalog {
        self.catalog
    }

    /// Translates a question into a validated structured query.
    pub async fn translate(&self, question: &str) -> Result<StructuredQuery> {
        let messages = build_translator_messages(self.catalog, question);
        let start = Instant::now();

        let content = self
            .llm
            .complete(&messages, ResponseFormat::JsonObject)
            .await?;

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            response = %content,
            "Received structured query"
        );

        let mut query = parse_query(&content)?;
        self.ensure_primary_field(&mut query);
        self.catalog.validate(&query)?;
        Ok(query)
    }

    /// Prepends the primary field to the projection if the model left it out.
    fn ensure_primary_field(&self, query: &mut StructuredQuery) {
        let primary = self.catalog.primary_field();
        if !query.return_fields.iter().any(|f| f == primary) {
            debug!(field = primary, "Adding primary field to return_fields");
            query.return_fields.insert(0, primary.to_string());
        }
    }
}

/// Decodes the model's `{"query": {...}}` envelope.
///
/// Content that is not a JSON object with a `query` key is malformed; a
/// `query` value of the wrong shape is an invalid query.
pub fn parse_query(content: &str) -> Result<StructuredQuery> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| LumenError::malformed(format!("model output is not JSON: {e}")))?;

    let serde_json::Value::Object(mut envelope) = value else {
        return Err(LumenError::malformed("model output is not a JSON object"));
    };

    let query = envelope
        .remove(QUERY_KEY)
        .ok_or_else(|| LumenError::malformed(format!("model output has no '{QUERY_KEY}' key")))?;

    serde_json::from_value(query)
        .map_err(|e| LumenError::invalid_query(format!("query has an unexpected shape: {e}")))
}
