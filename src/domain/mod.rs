//! Domain layer - core data model and external-service contracts

pub mod claim;
pub mod error;
pub mod evidence;
pub mod fetch;
pub mod llm;
pub mod search;
pub mod structured;

pub use claim::{sources_from_value, ClaimResult, Verdict};
pub use error::DomainError;
pub use evidence::{
    render_digest, EvidenceRecord, DEFAULT_DIGEST_MAX_CHARS, DIGEST_TRUNCATION_MARKER,
};
pub use fetch::PageFetcher;
pub use llm::{ChatRequest, ChatResponse, FinishReason, LlmProvider, Message, MessageRole, Usage};
pub use search::{SearchMode, SearchProvider, SearchRequest};
pub use structured::{decode_payload, strip_code_fences, PayloadError};
