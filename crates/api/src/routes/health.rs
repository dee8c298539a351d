//! Health check endpoint for deployment monitoring

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::context::AppContext;

pub fn router() -> Router<Arc<AppContext>> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// The gateway holds no connections and no mutable state beyond the cache,
/// so liveness is the only meaningful probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
