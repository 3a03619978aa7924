use crate::error::Result;
use crate::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

/// A chat-completion backend. One request in, one complete response out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    fn default_model(&self) -> &str;
}
