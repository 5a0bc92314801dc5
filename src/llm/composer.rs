//! Answer composition from query results.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::llm::prompt::build_composer_messages;
use crate::llm::types::ResponseFormat;
use crate::llm::LlmClient;

/// Turns a question and its serialized query result into a plain-text answer.
pub struct AnswerComposer {
    llm: Arc<dyn LlmClient>,
}

impl AnswerComposer {
    /// Creates a composer over the given model client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Composes an answer. The model's reply is returned verbatim.
    pub async fn compose(&self, question: &str, result_json: &str) -> Result<String> {
        let messages = build_composer_messages(question, result_json);
        let start = Instant::now();

        let answer = self.llm.complete(&messages, ResponseFormat::Text).await?;

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            answer_len = answer.len(),
            "Received answer"
        );

        Ok(answer)
    }
}
