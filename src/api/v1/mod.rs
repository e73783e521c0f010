//! Versioned check API

pub mod check;

use axum::routing::{get, post};
use axum::Router;

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/check", post(check::check))
        .route("/history", get(check::history))
}
