//! Answer-generation capability interface and the Claude-backed impl.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

/// Produces a natural-language answer for an assembled prompt.
///
/// This is the terminal point of the pipeline; failure here aborts the whole
/// QA request. Output is returned verbatim — no post-processing, no
/// truncation.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Production generator backed by the shared [`LlmClient`].
#[derive(Clone)]
pub struct ClaudeGenerator {
    client: LlmClient,
}

impl ClaudeGenerator {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerGenerator for ClaudeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.client.call(prompt, None).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}
