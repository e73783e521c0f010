//! Claim extraction from raw text or a fetched page.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{decode_payload, DomainError, PageFetcher};
use crate::infrastructure::fetch::extract_article_text;
use crate::infrastructure::llm::InferenceGateway;

/// Pages yielding less text than this carry no checkable content.
const MIN_ARTICLE_CHARS: usize = 100;

pub struct ClaimExtractor {
    gateway: Arc<InferenceGateway>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ClaimExtractor {
    pub fn new(gateway: Arc<InferenceGateway>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { gateway, fetcher }
    }

    /// Extract up to `max_claims` atomic factual claims from raw text.
    ///
    /// Malformed model output is never an error: any parse failure or
    /// structural mismatch yields an empty list.
    pub async fn extract(
        &self,
        text: &str,
        max_claims: usize,
    ) -> Result<Vec<String>, DomainError> {
        let system = extraction_instruction(max_claims);
        let user = format!("Text:\n\n{text}\n\nExtract up to {max_claims} factual claims.");

        let raw = self.gateway.chat(&user, Some(&system)).await?;
        let claims = parse_claims(&raw, max_claims);
        debug!(count = claims.len(), "claims extracted");

        Ok(claims)
    }

    /// Fetch a page and extract claims from its article text.
    ///
    /// Fetch failures and pages with too little text are expected outcomes
    /// and yield an empty list without reaching the inference service.
    pub async fn extract_from_url(
        &self,
        url: &str,
        max_claims: usize,
    ) -> Result<Vec<String>, DomainError> {
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(error) => {
                warn!(url, %error, "page fetch failed, treating as no content");
                return Ok(Vec::new());
            }
        };

        let text = extract_article_text(&html);
        if text.trim().chars().count() < MIN_ARTICLE_CHARS {
            debug!(url, "fetched page has no usable article text");
            return Ok(Vec::new());
        }

        self.extract(&text, max_claims).await
    }
}

fn extraction_instruction(max_claims: usize) -> String {
    format!(
        "You are an information extraction assistant.\n\
         From the user's text, extract up to {max_claims} atomic factual claims.\n\
         Each claim should:\n\
         - Be checkable against external sources (dates, numbers, named entities)\n\
         - Be concrete and not an opinion.\n\n\
         Return STRICT JSON:\n\
         {{\n  \"claims\": [\"...\", \"...\"]\n}}\n"
    )
}

#[derive(Debug, Deserialize)]
struct ClaimsPayload {
    #[serde(default)]
    claims: Value,
}

fn parse_claims(raw: &str, max_claims: usize) -> Vec<String> {
    let payload: ClaimsPayload = match decode_payload(raw) {
        Ok(payload) => payload,
        Err(error) => {
            debug!(%error, "claim payload unparseable, returning no claims");
            return Vec::new();
        }
    };

    let Value::Array(items) = payload.claims else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|claim| !claim.is_empty())
        .map(str::to_string)
        .take(max_claims)
        .collect()
}
