//! Miner-count series endpoint
//!
//! One route: `GET /api/miner-count?range=7d|30d`. An absent `range` falls
//! back to seven days; a present-but-unknown token is rejected with 400
//! rather than silently defaulted, so a typo never masquerades as data.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chainboard_domain::constants::MINERS_SUBJECT;
use chainboard_domain::MetricsError;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::context::AppContext;

/// Range token applied when the query omits one.
const DEFAULT_RANGE: &str = "7d";

/// Query parameters for the miner-count endpoint.
#[derive(Debug, Deserialize)]
pub struct MinerCountQuery {
    range: Option<String>,
}

pub fn router() -> Router<Arc<AppContext>> {
    Router::new().route("/miner-count", get(miner_count))
}

/// GET /api/miner-count
///
/// # Example Response
/// ```json
/// {
///   "series": [
///     { "date": "2025-08-14", "count": 2801 },
///     { "date": "2025-08-15", "count": 2803 }
///   ],
///   "freshness": "fresh"
/// }
/// ```
async fn miner_count(
    State(context): State<Arc<AppContext>>,
    Query(query): Query<MinerCountQuery>,
) -> Response {
    let token = query.range.as_deref().unwrap_or(DEFAULT_RANGE);

    match context.metrics.series_for(MINERS_SUBJECT, token).await {
        Ok(chart) => (StatusCode::OK, Json(chart)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Map a metrics failure onto its status code and `{"error": ...}` body.
fn error_response(err: &MetricsError) -> Response {
    let status = match err {
        MetricsError::InvalidRange(_) => StatusCode::BAD_REQUEST,
        MetricsError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        MetricsError::UpstreamUnavailable { .. } | MetricsError::UpstreamBadResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
    };

    if !err.is_client_error() {
        warn!(error = %err, "miner-count request failed");
    }

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
