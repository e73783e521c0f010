//! Inference-service plumbing: HTTP client, provider, gateway.

mod cerebras;
mod gateway;
pub mod http_client;

pub use cerebras::CerebrasProvider;
pub use gateway::InferenceGateway;
pub use http_client::{HttpClient, HttpClientTrait};
