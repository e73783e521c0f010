use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, EvidenceRecord, SearchProvider, SearchRequest};
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_PARALLEL_BASE_URL: &str = "https://api.parallel.ai";

/// Parallel Search API provider
#[derive(Debug)]
pub struct ParallelSearchProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> ParallelSearchProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_PARALLEL_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/v1beta/search", self.base_url)
    }

    fn build_request(&self, request: &SearchRequest) -> serde_json::Value {
        serde_json::json!({
            "objective": request.objective,
            "search_queries": request.queries,
            "mode": request.mode,
            "max_results": request.max_results,
            "excerpts": { "max_chars_per_result": request.excerpt_max_chars },
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<EvidenceRecord>, DomainError> {
        let response: ParallelResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("parallel", format!("Failed to parse response: {}", e))
        })?;

        Ok(response
            .results
            .into_iter()
            .map(ParallelResult::into_record)
            .collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> SearchProvider for ParallelSearchProvider<C> {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<EvidenceRecord>, DomainError> {
        let url = self.search_url();
        let body = self.build_request(request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "parallel"
    }
}

// Parallel API types

#[derive(Debug, Deserialize)]
struct ParallelResponse {
    #[serde(default)]
    results: Vec<ParallelResult>,
}

#[derive(Debug, Deserialize)]
struct ParallelResult {
    url: String,
    title: Option<String>,
    publish_date: Option<String>,
    #[serde(default)]
    excerpts: Vec<String>,
}

impl ParallelResult {
    fn into_record(self) -> EvidenceRecord {
        EvidenceRecord {
            url: self.url,
            title: self.title,
            publish_date: self.publish_date,
            excerpts: self.excerpts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchMode;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use crate::infrastructure::llm::HttpClient;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> SearchRequest {
        SearchRequest {
            objective: "Find sources".to_string(),
            queries: vec!["the moon landing year".to_string()],
            mode: SearchMode::OneShot,
            max_results: 6,
            excerpt_max_chars: 8000,
        }
    }

    fn search_body() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {
                    "url": "https://www.nasa.gov/apollo11",
                    "title": "Apollo 11",
                    "publish_date": "2019-07-20",
                    "excerpts": ["Apollo 11 landed in 1969."]
                },
                {
                    "url": "https://example.org/bare"
                }
            ]
        })
    }

    #[test]
    fn test_build_request_shape() {
        let provider = ParallelSearchProvider::new(MockHttpClient::new(), "test-key");
        let body = provider.build_request(&request());

        assert_eq!(body["objective"], "Find sources");
        assert_eq!(body["search_queries"][0], "the moon landing year");
        assert_eq!(body["mode"], "one-shot");
        assert_eq!(body["max_results"], 6);
        assert_eq!(body["excerpts"]["max_chars_per_result"], 8000);
    }

    #[tokio::test]
    async fn test_search_normalizes_missing_fields() {
        let provider = ParallelSearchProvider::new(
            MockHttpClient::new()
                .with_response("https://api.parallel.ai/v1beta/search", search_body()),
            "test-key",
        );

        let records = provider.search(&request()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title.as_deref(), Some("Apollo 11"));
        assert_eq!(records[0].excerpts.len(), 1);
        assert!(records[1].title.is_none());
        assert!(records[1].publish_date.is_none());
        assert!(records[1].excerpts.is_empty());
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/search"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .mount(&server)
            .await;

        let provider =
            ParallelSearchProvider::with_base_url(HttpClient::new(), "test-key", server.uri());

        let records = provider.search(&request()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://www.nasa.gov/apollo11");
    }

    #[tokio::test]
    async fn test_search_surfaces_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let provider =
            ParallelSearchProvider::with_base_url(HttpClient::new(), "test-key", server.uri());

        let error = provider.search(&request()).await.unwrap_err();
        assert!(matches!(error, DomainError::Upstream { status: 503, .. }));
    }
}
