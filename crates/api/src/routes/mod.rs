//! HTTP routes for the gateway

use std::sync::Arc;

use axum::Router;

use crate::context::AppContext;

pub mod catalog;
pub mod health;
pub mod metrics;

/// Build the application router over a wired context.
pub fn build_router(context: Arc<AppContext>) -> Router {
    let api = Router::new().merge(metrics::router()).merge(catalog::router());

    Router::new().merge(health::router()).nest("/api", api).with_state(context)
}
