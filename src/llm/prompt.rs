//! Prompt construction for LLM requests.
//!
//! Builds the translator and composer message lists.

use crate::catalog::FieldCatalog;
use crate::llm::types::Message;

/// System prompt template for the query translator.
const TRANSLATOR_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant that translates a user question about lighting products into a structured database query.

Respond with a single JSON object of the following form:
{"query": {"type": "one" | "many", "where": [{"field": "<field>", "op": "eq" | "gte" | "lte" | "gt" | "lt", "value": <string or number>}], "return_fields": ["<field>", ...]}}

Use "one" when the question is about a single product and "many" when it asks for a list of products.
All filters are combined with AND.
Numbers must be JSON numbers, dates must be strings in YYYY-MM-DD form.
List fields only support "eq" with a single string value, which matches when the list contains it.
Only use fields from the schema below.
Always include "{primary}" in return_fields.

DATABASE SCHEMA:
{schema}"#;

/// System prompt for the answer composer.
pub const COMPOSER_SYSTEM_PROMPT: &str = "You are a helpful assistant that maps a database result returned as JSON to an answer of a previous user question. Your answer should be in plain text.";

/// Builds the translator system prompt with the catalog schema injected.
pub fn build_translator_prompt(catalog: &FieldCatalog) -> String {
    TRANSLATOR_PROMPT_TEMPLATE
        .replace("{primary}", catalog.primary_field())
        .replace("{schema}", &catalog.format_for_llm())
}

/// Builds the message list for translating a question.
pub fn build_translator_messages(catalog: &FieldCatalog, question: &str) -> Vec<Message> {
    vec![
        Message::system(build_translator_prompt(catalog)),
        Message::user(format!("User question: {question}")),
    ]
}

/// Builds the message list for composing an answer from a serialized result.
pub fn build_composer_messages(question: &str, result_json: &str) -> Vec<Message> {
    vec![
        Message::system(COMPOSER_SYSTEM_PROMPT),
        Message::user(format!(
            "User question: {question}\nDB Result: {result_json}\nAnswer:"
        )),
    ]
}
