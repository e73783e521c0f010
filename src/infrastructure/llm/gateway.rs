//! Inference gateway
//!
//! The single chokepoint for inference calls: composes the message list,
//! waits on the shared request governor, and hands back the model's raw text.
//! Parsing and validation belong to callers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::InferenceConfig;
use crate::domain::{ChatRequest, DomainError, FinishReason, LlmProvider};
use crate::infrastructure::rate_limit::RequestGovernor;

pub struct InferenceGateway {
    provider: Arc<dyn LlmProvider>,
    governor: Arc<RequestGovernor>,
    config: InferenceConfig,
}

impl InferenceGateway {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        governor: Arc<RequestGovernor>,
        config: InferenceConfig,
    ) -> Self {
        Self {
            provider,
            governor,
            config,
        }
    }

    /// Issue one chat completion and return the response text verbatim.
    ///
    /// The optional system message is placed before the user message. The
    /// governor is consulted before every call and may block for up to a
    /// window length.
    pub async fn chat(
        &self,
        user_text: &str,
        system_text: Option<&str>,
    ) -> Result<String, DomainError> {
        let waited = self.governor.admit().await;
        if !waited.is_zero() {
            debug!(
                waited_secs = waited.as_secs_f64(),
                "inference call delayed by rate governor"
            );
        }

        let mut builder = ChatRequest::builder();
        if let Some(system) = system_text {
            builder = builder.system(system);
        }
        let request = builder
            .user(user_text)
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self.provider.chat(&self.config.model, request).await?;

        if response.finish_reason == Some(FinishReason::Length) {
            warn!(
                provider = self.provider.provider_name(),
                "model output was cut off at the token limit"
            );
        }

        if let Some(ref usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "inference call completed"
            );
        }

        Ok(response.content().to_string())
    }
}
