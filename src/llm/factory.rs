//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients.

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{LumenError, Result};
use crate::llm::{LlmClient, LlmProvider, MockLlmClient, OpenAiClient, OpenAiConfig};

/// Creates an LLM client from configuration.
///
/// The API key is taken from the config, then from `OPENAI_API_KEY`.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let provider: LlmProvider = config.provider.parse().map_err(LumenError::config)?;

    match provider {
        LlmProvider::OpenAi => {
            let key = config.resolve_api_key().ok_or_else(|| {
                LumenError::config("No API key configured. Set OPENAI_API_KEY.")
            })?;
            let openai = OpenAiConfig::new(key, config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout_secs);
            Ok(Arc::new(OpenAiClient::new(openai)?))
        }
        LlmProvider::Mock => Ok(Arc::new(MockLlmClient::new())),
    }
}
