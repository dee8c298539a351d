//! Port interfaces for the metrics path
//!
//! These traits define the boundary between core business logic and the
//! infrastructure that talks to the upstream chain-index service.

use std::sync::Arc;

use async_trait::async_trait;
use chainboard_domain::{MetricsError, Sample, TimeWindow};

/// Boundary to the upstream source of raw count observations.
///
/// One call issues one logical upstream request for the whole window. The
/// implementation owns its timeout and never retries; when it fails, the
/// caller decides between a stale cache entry and surfacing the error.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch raw samples for `subject` across `window`, ordered by
    /// timestamp ascending.
    ///
    /// # Errors
    ///
    /// Returns the upstream subset of [`MetricsError`]:
    /// `UpstreamUnavailable` for a non-success status, `UpstreamTimeout` for
    /// transport failures, `UpstreamBadResponse` for bodies failing shape
    /// validation.
    async fn fetch(&self, subject: &str, window: &TimeWindow)
        -> Result<Vec<Sample>, MetricsError>;
}

/// Shared handle to a sample source.
pub type SharedSampleSource = Arc<dyn SampleSource>;
