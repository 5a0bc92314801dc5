//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{LumenError, Result};
use crate::llm::types::{Message, ResponseFormat, Role};
use crate::llm::LlmClient;

/// A request received by the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub format: ResponseFormat,
}

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
    /// Error message returned for every request, if set.
    failure: Option<String>,
    /// Every request seen so far.
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client whose endpoint is unreachable.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Adds a custom response mapping.
    ///
    /// When the last user message contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Generates a mock response based on the input.
    fn mock_response(&self, input: &str, format: ResponseFormat) -> String {
        let input_lower = input.to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        match format {
            ResponseFormat::JsonObject => default_query_response(&input_lower),
            ResponseFormat::Text => default_answer(&input_lower),
        }
    }

    /// Extracts the last user message content from a message list.
    fn extract_user_input(messages: &[Message]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

fn default_query_response(input: &str) -> String {
    if input.contains("weight") || input.contains("gewicht") {
        return r#"{"query":{"type":"one","where":[{"field":"name","op":"eq","value":"XBO 2500 W/HS XL OFR"}],"return_fields":["name","produkt_gewicht_g"]}}"#.to_string();
    }

    if input.contains("lifetime") || input.contains("lebensdauer") {
        return r#"{"query":{"type":"many","where":[{"field":"lebensdauer_h","op":"gt","value":3000}],"return_fields":["name","lebensdauer_h"]}}"#.to_string();
    }

    r#"{"query":{"type":"many","where":[],"return_fields":["name"]}}"#.to_string()
}

fn default_answer(input: &str) -> String {
    if input.contains("db result: []") {
        return "No matching products were found.".to_string();
    }

    "Here is what I found in the product database.".to_string()
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message], format: ResponseFormat) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                messages: messages.to_vec(),
                format,
            });
        }

        if let Some(message) = &self.failure {
            return Err(LumenError::llm(message.clone()));
        }

        let input = Self::extract_user_input(messages);
        Ok(self.mock_response(&input, format))
    }
}
