//! Application state shared by the API handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ClaimResult;
use crate::infrastructure::services::FactCheckPipeline;

/// Completed checks kept in memory, newest first.
const HISTORY_LIMIT: usize = 50;

/// One completed fact-check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub id: Uuid,
    pub kind: String,
    /// Leading slice of the checked input, for listings.
    pub input_preview: String,
    pub checked_at: DateTime<Utc>,
    pub results: Vec<ClaimResult>,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FactCheckPipeline>,
    /// Claim cap applied when a request does not name one.
    pub default_max_claims: usize,
    history: Arc<RwLock<Vec<CheckRecord>>>,
}

impl AppState {
    pub fn new(pipeline: Arc<FactCheckPipeline>, default_max_claims: usize) -> Self {
        Self {
            pipeline,
            default_max_claims,
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn push_history(&self, record: CheckRecord) {
        let mut history = self.history.write().await;
        history.insert(0, record);
        history.truncate(HISTORY_LIMIT);
    }

    pub async fn history(&self) -> Vec<CheckRecord> {
        self.history.read().await.clone()
    }
}
