//! Evidence retrieval for claim verification.

use std::sync::Arc;

use tracing::debug;

use crate::config::SearchConfig;
use crate::domain::{
    render_digest, DomainError, EvidenceRecord, SearchMode, SearchProvider, SearchRequest,
};

pub struct EvidenceRetriever {
    provider: Arc<dyn SearchProvider>,
    config: SearchConfig,
}

impl EvidenceRetriever {
    pub fn new(provider: Arc<dyn SearchProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Search the web for evidence on a query.
    ///
    /// The objective biases the search service toward authoritative sources;
    /// excerpts are capped at the configured per-result character budget.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<EvidenceRecord>, DomainError> {
        let objective = format!(
            "Find high-quality, up-to-date sources that answer the question:\n\n{query}\n\n\
             Prefer authoritative sites (e.g., .gov, .edu, major news, or official org websites)."
        );

        let request = SearchRequest {
            objective,
            queries: vec![query.to_string()],
            mode,
            max_results,
            excerpt_max_chars: self.config.excerpt_max_chars,
        };

        let records = self.provider.search(&request).await?;
        debug!(
            provider = self.provider.provider_name(),
            count = records.len(),
            "evidence retrieved"
        );

        Ok(records)
    }

    /// Render records into the bounded digest embedded in prompts.
    pub fn render_digest(&self, records: &[EvidenceRecord]) -> String {
        render_digest(records, self.config.digest_max_chars)
    }
}
