//! Check endpoint: run the pipeline over text or a URL, record history.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::{AppState, CheckRecord};
use crate::api::types::ApiError;
use crate::domain::ClaimResult;

/// Leading slice of the input kept in history listings.
const PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Url,
}

impl InputKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub input: String,
    #[serde(default)]
    pub kind: InputKind,
    pub max_claims: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub id: Uuid,
    pub kind: InputKind,
    pub checked_at: chrono::DateTime<Utc>,
    /// Empty means nothing checkable was found, not a failure.
    pub results: Vec<ClaimResult>,
}

pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    if request.input.trim().is_empty() {
        return Err(ApiError::bad_request("input must not be empty"));
    }

    let max_claims = request.max_claims.unwrap_or(state.default_max_claims);
    let results = match request.kind {
        InputKind::Text => {
            state
                .pipeline
                .check_text(&request.input, max_claims, None)
                .await?
        }
        InputKind::Url => {
            state
                .pipeline
                .check_url(&request.input, max_claims, None)
                .await?
        }
    };

    let response = CheckResponse {
        id: Uuid::new_v4(),
        kind: request.kind,
        checked_at: Utc::now(),
        results,
    };

    state
        .push_history(CheckRecord {
            id: response.id,
            kind: request.kind.as_str().to_string(),
            input_preview: request.input.chars().take(PREVIEW_CHARS).collect(),
            checked_at: response.checked_at,
            results: response.results.clone(),
        })
        .await;

    Ok(Json(response))
}

pub async fn history(State(state): State<AppState>) -> Json<Vec<CheckRecord>> {
    Json(state.history().await)
}
