//! HTTP API exposing the claim verification pipeline

pub mod health;
pub mod router;
pub mod state;
pub mod types;
pub mod v1;

pub use router::create_router;
pub use state::{AppState, CheckRecord};
