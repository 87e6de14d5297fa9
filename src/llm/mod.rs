//! LLM — chat-completion adapter for the textbook assistant.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables. The concrete
//! [`LlmClient`] talks to any OpenAI-compatible endpoint; callers depend on
//! the [`LlmChat`] trait so tests can substitute a mock.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::{ChatResponse, LlmChat, LlmError, Message, Sampling};

/// Concrete LLM client backed by an OpenAI-compatible API.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gpt-4"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, sampling: Sampling, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner
            .chat(&self.model, sampling, system, messages)
            .await
    }
}
