//! Upgrade and FIP catalog endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chainboard_domain::UpgradeStatus;
use serde::Deserialize;
use serde_json::json;

use crate::context::AppContext;

/// Query parameters for the upgrade listing.
#[derive(Debug, Default, Deserialize)]
pub struct UpgradeListQuery {
    /// Substring matched against upgrade names and `nvNN` tags.
    q: Option<String>,
    /// Lifecycle filter (`upcoming` / `finalized`), matched case-insensitively.
    status: Option<String>,
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/upgrades", get(list_upgrades))
        .route("/upgrades/{id}", get(upgrade_detail))
        .route("/fips/{id}", get(fip_detail))
}

/// GET /api/upgrades
async fn list_upgrades(
    State(context): State<Arc<AppContext>>,
    Query(query): Query<UpgradeListQuery>,
) -> Response {
    // A status token outside the known set matches nothing instead of
    // erroring; the filter is exact equality over a closed set of states.
    let upgrades = if let Some(token) = query.status.as_deref() {
        match parse_status(token) {
            Some(wanted) => context.catalog.upgrades_filtered(query.q.as_deref(), Some(wanted)),
            None => Vec::new(),
        }
    } else {
        context.catalog.upgrades_filtered(query.q.as_deref(), None)
    };

    (StatusCode::OK, Json(json!({ "upgrades": upgrades }))).into_response()
}

/// GET /api/upgrades/{id}
async fn upgrade_detail(
    State(context): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Response {
    match context.catalog.upgrade(&id) {
        Some(detail) => (StatusCode::OK, Json(detail)).into_response(),
        None => not_found("upgrade not found"),
    }
}

/// GET /api/fips/{id}
async fn fip_detail(State(context): State<Arc<AppContext>>, Path(id): Path<String>) -> Response {
    match context.catalog.fip(&id) {
        Some(fip) => (StatusCode::OK, Json(fip)).into_response(),
        None => not_found("fip not found"),
    }
}

fn parse_status(token: &str) -> Option<UpgradeStatus> {
    match token.to_ascii_lowercase().as_str() {
        "upcoming" => Some(UpgradeStatus::Upcoming),
        "finalized" => Some(UpgradeStatus::Finalized),
        _ => None,
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
