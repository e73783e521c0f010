use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    ChatRequest, ChatResponse, DomainError, FinishReason, LlmProvider, Message, MessageRole, Usage,
};

const DEFAULT_CEREBRAS_BASE_URL: &str = "https://api.cerebras.ai";

/// Cerebras inference provider (OpenAI-compatible chat completions API)
#[derive(Debug)]
pub struct CerebrasProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> CerebrasProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_CEREBRAS_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &ChatRequest) -> serde_json::Value {
        let messages: Vec<CerebrasMessage> = request
            .messages
            .iter()
            .map(CerebrasMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<ChatResponse, DomainError> {
        let response: CerebrasResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("cerebras", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("cerebras", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut chat_response = ChatResponse::new(
            response.id.unwrap_or_default(),
            response.model.unwrap_or_default(),
            message,
        );

        if let Some(reason) = choice.finish_reason {
            chat_response = chat_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            chat_response = chat_response
                .with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for CerebrasProvider<C> {
    async fn chat(&self, model: &str, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "cerebras"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Cerebras API types

#[derive(Debug, Serialize)]
struct CerebrasMessage {
    role: String,
    content: String,
}

impl CerebrasMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CerebrasResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Vec<CerebrasChoice>,
    usage: Option<CerebrasUsage>,
}

#[derive(Debug, Deserialize)]
struct CerebrasChoice {
    message: CerebrasResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CerebrasResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CerebrasUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use crate::infrastructure::llm::HttpClient;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_URL: &str = "https://api.cerebras.ai/v1/chat/completions";

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "zai-glm-4.7",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
        })
    }

    #[tokio::test]
    async fn test_chat_parses_first_choice() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion_body("All good."));
        let provider = CerebrasProvider::new(client, "test-api-key");

        let request = ChatRequest::builder().user("Hello!").build();
        let response = provider.chat("zai-glm-4.7", request).await.unwrap();

        assert_eq!(response.content(), "All good.");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 19);
    }

    #[tokio::test]
    async fn test_chat_transport_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = CerebrasProvider::new(client, "test-api-key");

        let request = ChatRequest::builder().user("Hello!").build();
        let result = provider.chat("zai-glm-4.7", request).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_build_request_shape() {
        let provider = CerebrasProvider::new(MockHttpClient::new(), "test-api-key");
        let request = ChatRequest::builder()
            .system("Be skeptical.")
            .user("Check this claim.")
            .temperature(1.0)
            .top_p(0.95)
            .max_tokens(4096)
            .build();

        let body = provider.build_request("zai-glm-4.7", &request);

        assert_eq!(body["model"], "zai-glm-4.7");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["top_p"], 0.95);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_build_request_omits_unset_params() {
        let provider = CerebrasProvider::new(MockHttpClient::new(), "test-api-key");
        let request = ChatRequest::builder().user("hi").build();

        let body = provider.build_request("zai-glm-4.7", &request);

        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn test_chat_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Verified.")))
            .mount(&server)
            .await;

        let provider = CerebrasProvider::with_base_url(HttpClient::new(), "test-key", server.uri());
        let request = ChatRequest::builder().user("Hello!").build();

        let response = provider.chat("zai-glm-4.7", request).await.unwrap();
        assert_eq!(response.content(), "Verified.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let provider = CerebrasProvider::with_base_url(HttpClient::new(), "test-key", server.uri());
        let request = ChatRequest::builder().user("Hello!").build();

        let error = provider.chat("zai-glm-4.7", request).await.unwrap_err();
        match error {
            DomainError::Upstream { status, .. } => assert_eq!(status, 429),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
