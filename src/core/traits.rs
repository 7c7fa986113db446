use async_trait::async_trait;

use super::{error::LlmError, types::PromptRequest};

/// A hosted model that turns a prompt into text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and return the first generated choice verbatim.
    async fn generate_text(&self, request: &PromptRequest) -> Result<String, LlmError>;

    /// Model identifier used for every request.
    fn model(&self) -> &str;
}
