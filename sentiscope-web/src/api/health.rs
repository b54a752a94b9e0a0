//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// GET /health
///
/// Reports liveness only; does not call the inference endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "sentiscope-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.classifier.model_name().to_string(),
        started_at: state.startup_time,
        uptime_seconds: (Utc::now() - state.startup_time).num_seconds(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
