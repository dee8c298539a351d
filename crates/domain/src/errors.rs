//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the metrics query path.
///
/// These are the typed results the gateway maps onto HTTP statuses; none of
/// them is ever allowed to cross the gateway boundary as an unstructured
/// failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// The range token is not in the supported set. Client-correctable.
    #[error("invalid range")]
    InvalidRange(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    UpstreamUnavailable {
        /// Status code the upstream answered with, kept for diagnostics.
        status: u16,
    },

    /// Transport failure: connect error or deadline exceeded.
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(String),

    /// The upstream body decoded but failed shape validation.
    #[error("upstream response malformed: {0}")]
    UpstreamBadResponse(String),
}

impl MetricsError {
    /// Whether this error is correctable by the caller (bad input) as
    /// opposed to an upstream/environment failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRange(_))
    }

    /// Whether a cached series may be served in place of this error.
    ///
    /// Only upstream failures are recoverable through the stale-serve
    /// fallback; invalid input never is.
    #[must_use]
    pub const fn is_stale_recoverable(&self) -> bool {
        !self.is_client_error()
    }
}

/// Main error type for Chainboard
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ChainboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MetricsError> for ChainboardError {
    fn from(err: MetricsError) -> Self {
        match err {
            MetricsError::InvalidRange(token) => Self::InvalidInput(format!("invalid range {token:?}")),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Result type alias for Chainboard operations
pub type Result<T> = std::result::Result<T, ChainboardError>;
