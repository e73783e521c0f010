//! Infrastructure layer - external services, throttling, and pipeline wiring

pub mod fetch;
pub mod llm;
pub mod logging;
pub mod rate_limit;
pub mod search;
pub mod services;
