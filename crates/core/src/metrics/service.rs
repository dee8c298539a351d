//! Metrics service - orchestrates the query path end to end.

use std::sync::Arc;
use std::time::Duration;

use chainboard_common::time::{Clock, SystemClock};
use chainboard_domain::{ChartRange, ChartSeries, MetricsError};
use tracing::debug;

use super::aggregate::aggregate;
use super::cache::{CacheKey, SeriesCache};
use super::ports::SharedSampleSource;
use super::range::resolve_window;

/// The metrics query service behind the chart endpoint.
///
/// Resolves the range, then reads through the [`SeriesCache`]; on a miss the
/// cache runs this service's loader (one upstream fetch plus aggregation)
/// under the key's flight lock. Retry is deliberately absent: when the
/// upstream fails, the cache's stale fallback answers instead.
pub struct MetricsService {
    source: SharedSampleSource,
    cache: SeriesCache,
    clock: Arc<dyn Clock>,
}

impl MetricsService {
    /// Create a service over `source` with the given cache TTL, on the
    /// system clock.
    #[must_use]
    pub fn new(source: SharedSampleSource, cache_ttl: Duration) -> Self {
        Self::with_clock(source, cache_ttl, Arc::new(SystemClock))
    }

    /// Create a service reading time from `clock`.
    ///
    /// The same clock drives window resolution and cache expiry, so tests
    /// can advance one instrument and see both move together.
    #[must_use]
    pub fn with_clock(source: SharedSampleSource, cache_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let cache = SeriesCache::with_clock(cache_ttl, Arc::clone(&clock));
        Self { source, cache, clock }
    }

    /// Handle one chart request: parse the token strictly, then serve the
    /// series for it.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidRange`] for tokens outside the
    /// supported set, and the upstream error subset when a cold fetch fails
    /// with no stale fallback available.
    pub async fn series_for(&self, subject: &str, token: &str) -> Result<ChartSeries, MetricsError> {
        let range = ChartRange::parse(token)?;
        self.series_for_range(subject, range).await
    }

    /// Serve the series for an already-parsed range.
    ///
    /// # Errors
    ///
    /// Returns the upstream error subset when a cold fetch fails with no
    /// stale fallback available.
    pub async fn series_for_range(
        &self,
        subject: &str,
        range: ChartRange,
    ) -> Result<ChartSeries, MetricsError> {
        let key = CacheKey::new(subject, range);
        let window = resolve_window(range, self.clock.as_ref());
        debug!(subject, range = %range, start = %window.start, end = %window.end, "metrics request");

        let source = Arc::clone(&self.source);
        let subject_owned = subject.to_string();
        let load_window = window.clone();
        let (series, freshness) = self
            .cache
            .get_or_refresh(&key, move || async move {
                let samples = source.fetch(&subject_owned, &load_window).await?;
                Ok(aggregate(&samples, &load_window))
            })
            .await?;

        Ok(ChartSeries::new(series, freshness))
    }
}
