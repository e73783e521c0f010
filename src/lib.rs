//! Claimcheck
//!
//! A claim verification pipeline: extract atomic factual claims from free
//! text or a web article, gather web evidence for each claim, and ask a
//! language model to judge each claim as true, false, or uncertain. Two
//! external services are consumed through narrow contracts: an inference
//! endpoint (Cerebras) and a web-search endpoint (Parallel), with all
//! inference calls throttled by a shared sliding-window governor.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

pub use config::AppConfig;
pub use domain::{ClaimResult, DomainError, Verdict};
pub use infrastructure::services::{FactCheckPipeline, ProgressCallback};

use infrastructure::fetch::HttpPageFetcher;
use infrastructure::llm::{CerebrasProvider, HttpClient, InferenceGateway};
use infrastructure::rate_limit::RequestGovernor;
use infrastructure::search::ParallelSearchProvider;
use infrastructure::services::{ClaimExtractor, ClaimVerifier, EvidenceRetriever};

/// Wire up the pipeline against the real external services.
///
/// One governor instance is constructed here and shared by every inference
/// call site. Missing credentials fail fast, before any network call.
pub fn create_pipeline(config: &AppConfig) -> Result<FactCheckPipeline, DomainError> {
    let inference_key = require_env("CEREBRAS_API_KEY")?;
    let search_key = require_env("PARALLEL_API_KEY")?;

    let governor = Arc::new(RequestGovernor::new(config.inference.requests_per_minute));

    let provider = Arc::new(CerebrasProvider::with_base_url(
        HttpClient::new(),
        inference_key,
        &config.inference.base_url,
    ));
    let gateway = Arc::new(InferenceGateway::new(
        provider,
        governor,
        config.inference.clone(),
    ));

    let search_provider = Arc::new(ParallelSearchProvider::with_base_url(
        HttpClient::new(),
        search_key,
        &config.search.base_url,
    ));
    let retriever = Arc::new(EvidenceRetriever::new(
        search_provider,
        config.search.clone(),
    ));

    let extractor = ClaimExtractor::new(gateway.clone(), Arc::new(HttpPageFetcher::new()));
    let verifier = ClaimVerifier::new(gateway, retriever, config.search.max_results);

    Ok(FactCheckPipeline::new(extractor, verifier))
}

fn require_env(name: &str) -> Result<String, DomainError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            DomainError::credential(format!(
                "{name} is not set. Copy .env.example to .env and add your key."
            ))
        })
}
