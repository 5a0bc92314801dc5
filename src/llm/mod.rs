//! LLM integration for lumen-ask.
//!
//! Provides the model client trait, its OpenAI and mock implementations, and
//! the two model hops of a request: question translation and answer composition.

pub mod composer;
pub mod factory;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod translator;
pub mod types;

pub use composer::AnswerComposer;
pub use factory::create_client;
pub use mock::{MockLlmClient, RecordedRequest};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use translator::{parse_query, QueryTranslator};
pub use types::{Message, ResponseFormat, Role};

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::Result;

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given messages in the requested format.
    ///
    /// Returns the content of the first choice.
    async fn complete(&self, messages: &[Message], format: ResponseFormat) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// OpenAI or any API speaking the same chat completions protocol
    #[default]
    OpenAi,
    /// Mock client for testing (no API key required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
