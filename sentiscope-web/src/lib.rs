//! sentiscope-web library - CSV sentiment annotation service
//!
//! Accepts a CSV upload, classifies each row's `text` through the configured
//! sentiment model and renders the annotated table.

pub mod api;
pub mod classifier;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sentiscope_common::config::ServiceConfig;
use sentiscope_common::UploadStore;
use tower_http::trace::TraceLayer;

use crate::classifier::SentimentClassifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upload folder holding uploads and result files
    pub store: UploadStore,
    /// Sentiment model, loaded once and reused for every request
    pub classifier: Arc<dyn SentimentClassifier>,
    /// Request body cap for uploads
    pub max_upload_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: UploadStore, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            store,
            classifier,
            max_upload_bytes: sentiscope_common::config::DEFAULT_MAX_UPLOAD_BYTES,
            startup_time: Utc::now(),
        }
    }

    /// Build state from resolved configuration
    pub fn from_config(config: &ServiceConfig, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            ..Self::new(UploadStore::new(&config.upload_folder), classifier)
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let body_limit = state.max_upload_bytes;

    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // Upload handling
        .route("/upload", post(api::upload_file))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
