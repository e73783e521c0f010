//! Pipeline services: retrieval, extraction, verification, orchestration.

mod extractor;
mod pipeline;
mod retriever;
mod verifier;

pub use extractor::ClaimExtractor;
pub use pipeline::{FactCheckPipeline, ProgressCallback};
pub use retriever::EvidenceRetriever;
pub use verifier::ClaimVerifier;
