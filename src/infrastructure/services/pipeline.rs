//! Pipeline orchestrator: extraction, then claim-by-claim verification.

use tracing::info;

use crate::domain::{ClaimResult, DomainError};
use crate::infrastructure::services::{ClaimExtractor, ClaimVerifier};

/// Synchronous progress hook, invoked once per claim before it is verified
/// with a human-readable message, the 0-based index, and the claim count.
pub type ProgressCallback<'a> = &'a (dyn Fn(&str, usize, usize) + Send + Sync);

pub struct FactCheckPipeline {
    extractor: ClaimExtractor,
    verifier: ClaimVerifier,
}

impl FactCheckPipeline {
    pub fn new(extractor: ClaimExtractor, verifier: ClaimVerifier) -> Self {
        Self {
            extractor,
            verifier,
        }
    }

    /// Extract claims from raw text and verify each one.
    ///
    /// An empty result means "nothing to check", not an error. Results are in
    /// extraction order, one per claim.
    pub async fn check_text(
        &self,
        text: &str,
        max_claims: usize,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<Vec<ClaimResult>, DomainError> {
        let claims = self.extractor.extract(text, max_claims).await?;
        self.verify_all(claims, progress).await
    }

    /// Extract claims from a web page and verify each one.
    pub async fn check_url(
        &self,
        url: &str,
        max_claims: usize,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<Vec<ClaimResult>, DomainError> {
        let claims = self.extractor.extract_from_url(url, max_claims).await?;
        self.verify_all(claims, progress).await
    }

    // Verification is strictly sequential: the rate-governed inference calls
    // stay simple to reason about and result order mirrors claim order.
    async fn verify_all(
        &self,
        claims: Vec<String>,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<Vec<ClaimResult>, DomainError> {
        if claims.is_empty() {
            info!("no claims extracted, nothing to check");
            return Ok(Vec::new());
        }

        let total = claims.len();
        let mut results = Vec::with_capacity(total);

        for (index, claim) in claims.iter().enumerate() {
            if let Some(callback) = progress {
                let message = format!("Checking claim {}/{}: {}", index + 1, total, claim);
                callback(&message, index, total);
            }

            let result = self.verifier.verify(claim).await?;
            results.push(result);
        }

        info!(total, "fact-check run complete");
        Ok(results)
    }
}
