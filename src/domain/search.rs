//! Web-search service contract.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::evidence::EvidenceRecord;
use super::DomainError;

/// Retrieval strategy of the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Single-shot retrieval, no iterative refinement.
    OneShot,
    /// Let the service refine queries on its own.
    Agentic,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneShot => write!(f, "one-shot"),
            Self::Agentic => write!(f, "agentic"),
        }
    }
}

/// A search request as the search service understands it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text description of what the results should accomplish.
    pub objective: String,
    pub queries: Vec<String>,
    pub mode: SearchMode,
    pub max_results: usize,
    /// Excerpt budget per result, in characters.
    pub excerpt_max_chars: usize,
}

/// Trait for web-search providers
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Run a search and return normalized evidence records.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<EvidenceRecord>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
