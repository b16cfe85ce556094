//! Health endpoint.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// `GET /health` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// Project name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Number of pages in the catalogue.
    pub pages: usize,
    /// Server start time.
    pub started_at: DateTime<Utc>,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: state.config.project_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pages: state.catalogue.len(),
        started_at: state.started_at,
    })
}
