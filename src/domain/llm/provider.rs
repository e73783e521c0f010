use std::fmt::Debug;

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse};
use crate::domain::DomainError;

/// Trait for inference providers
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: ChatRequest) -> Result<ChatResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
