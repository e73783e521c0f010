//! Evidence-grounded judgment of a single claim.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    decode_payload, sources_from_value, ClaimResult, DomainError, SearchMode, Verdict,
};
use crate::infrastructure::llm::InferenceGateway;
use crate::infrastructure::services::EvidenceRetriever;

/// Fixed reason attached when the model's verdict payload cannot be decoded.
const UNPARSEABLE_REASON: &str = "Could not parse model output.";

const VERIFICATION_INSTRUCTION: &str = "\
You are a careful, skeptical fact-checking assistant.
You get a factual claim and web search excerpts.
Decide if the evidence supports, contradicts, or does not clearly resolve the claim.

Respond with STRICT JSON:
{
  \"verdict\": \"true\" | \"false\" | \"uncertain\",
  \"reason\": \"short explanation\",
  \"top_sources\": [\"url1\", \"url2\", ...]
}
Use 'true' only when the evidence strongly supports the claim.
Use 'false' only when it clearly contradicts the claim.
Otherwise use 'uncertain'.";

pub struct ClaimVerifier {
    gateway: Arc<InferenceGateway>,
    retriever: Arc<EvidenceRetriever>,
    /// Evidence records requested per claim.
    evidence_results: usize,
}

impl ClaimVerifier {
    pub fn new(
        gateway: Arc<InferenceGateway>,
        retriever: Arc<EvidenceRetriever>,
        evidence_results: usize,
    ) -> Self {
        Self {
            gateway,
            retriever,
            evidence_results,
        }
    }

    /// Judge one claim against freshly retrieved evidence.
    ///
    /// Upstream service failures propagate; malformed model output never
    /// does — it degrades to an `uncertain` result with a fixed reason.
    pub async fn verify(&self, claim: &str) -> Result<ClaimResult, DomainError> {
        let records = self
            .retriever
            .search(claim, self.evidence_results, SearchMode::OneShot)
            .await?;
        let digest = self.retriever.render_digest(&records);

        let user = format!("Claim:\n{claim}\n\nEvidence (web search excerpts):\n{digest}\n");
        let raw = self
            .gateway
            .chat(&user, Some(VERIFICATION_INSTRUCTION))
            .await?;

        Ok(build_result(claim, &raw))
    }
}

#[derive(Debug, Deserialize)]
struct VerdictPayload {
    #[serde(default)]
    verdict: Value,
    #[serde(default)]
    reason: Value,
    #[serde(default)]
    top_sources: Value,
}

fn build_result(claim: &str, raw: &str) -> ClaimResult {
    let payload: VerdictPayload = match decode_payload(raw) {
        Ok(payload) => payload,
        Err(error) => {
            debug!(%error, "verdict payload unparseable, degrading to uncertain");
            return ClaimResult::new(claim, Verdict::Uncertain).with_reason(UNPARSEABLE_REASON);
        }
    };

    let verdict = Verdict::from_value(&payload.verdict);
    let reason = payload.reason.as_str().unwrap_or_default().to_string();
    let sources = sources_from_value(payload.top_sources);

    ClaimResult::new(claim, verdict)
        .with_reason(reason)
        .with_sources(sources)
}
