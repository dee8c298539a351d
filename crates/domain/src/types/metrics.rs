//! Metrics types: range tokens, time windows, samples, and series.
//!
//! The metrics path resolves a [`ChartRange`] token into a [`TimeWindow`],
//! fetches raw [`Sample`]s for that window, and aggregates them into a
//! [`Series`] of daily points. A [`ChartSeries`] pairs the series with its
//! [`Freshness`] so consumers can tell a live result from a stale fallback.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_SERIES_POINTS;
use crate::errors::MetricsError;

/* -------------------------------------------------------------------------- */
/* Range tokens and windows */
/* -------------------------------------------------------------------------- */

/// Supported historical lookback selectors for the chart.
///
/// The set is closed on purpose: every member must resolve to a bucket count
/// within [`MAX_SERIES_POINTS`], which keeps response sizes and upstream
/// query fan-out bounded. Unknown tokens are rejected, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartRange {
    /// Last seven days, one point per day.
    SevenDays,
    /// Last thirty days, one point per day.
    ThirtyDays,
}

impl ChartRange {
    /// Every supported range, in ascending span order.
    pub const ALL: [Self; 2] = [Self::SevenDays, Self::ThirtyDays];

    /// Parse a range token (`"7d"`, `"30d"`).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidRange`] for anything outside the
    /// supported set; the offending token is carried for diagnostics.
    pub fn parse(token: &str) -> Result<Self, MetricsError> {
        match token {
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            other => Err(MetricsError::InvalidRange(other.to_string())),
        }
    }

    /// Number of daily buckets this range spans.
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }

    /// The wire token for this range.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for ChartRange {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Concrete time window resolved from a [`ChartRange`].
///
/// `[start, end)` half-open, `end > start`, split into `bucket_width` slices.
/// When the width does not divide the span evenly the final bucket is
/// truncated at `end`; that is the fixed policy here, chosen because a
/// window ending "now" rarely lands on a bucket boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound.
    pub end: DateTime<Utc>,
    /// Width of each bucket.
    pub bucket_width: Duration,
}

impl TimeWindow {
    /// Build a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>, bucket_width: Duration) -> Self {
        Self { start, end, bucket_width }
    }

    /// Total span of the window.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Span in whole days, any partial day rounded up.
    ///
    /// This is what parameterizes the upstream `interval` query.
    #[must_use]
    pub fn days_spanned(&self) -> i64 {
        let secs = self.span().num_seconds();
        (secs + 86_399).div_euclid(86_400)
    }

    /// Whether `ts` falls inside the window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }

    /// Iterate the window's buckets in ascending order.
    #[must_use]
    pub const fn buckets(&self) -> Buckets {
        Buckets { cursor: self.start, end: self.end, width: self.bucket_width }
    }

    /// Number of buckets the window implies.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets().count()
    }
}

/// One half-open slice `[start, end)` of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound; equal to the window end for a truncated final
    /// bucket.
    pub end: DateTime<Utc>,
}

impl Bucket {
    /// Whether `ts` falls inside the bucket.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Iterator over a window's buckets.
///
/// A non-positive bucket width yields no buckets rather than looping
/// forever; windows like that are degenerate and produce an empty series.
#[derive(Debug, Clone)]
pub struct Buckets {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    width: Duration,
}

impl Iterator for Buckets {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.width <= Duration::zero() || self.cursor >= self.end {
            return None;
        }
        let bucket_end = (self.cursor + self.width).min(self.end);
        let bucket = Bucket { start: self.cursor, end: bucket_end };
        self.cursor = bucket_end;
        Some(bucket)
    }
}

/* -------------------------------------------------------------------------- */
/* Samples and series */
/* -------------------------------------------------------------------------- */

/// One raw count observation from the upstream source.
///
/// Immutable once received; the subject it belongs to rides next to the
/// sample as a fetch parameter instead of being duplicated into every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// When the observation was taken.
    pub timestamp: DateTime<Utc>,
    /// Observed count; non-negative by construction.
    pub count: u64,
}

impl Sample {
    /// Build a sample.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, count: u64) -> Self {
        Self { timestamp, count }
    }
}

/// One aggregated point: the count for a single bucket, labeled by the
/// bucket's start date (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Start date of the bucket this point summarizes.
    pub date: NaiveDate,
    /// Count attributed to the bucket.
    pub count: u64,
}

impl SeriesPoint {
    /// Build a point.
    #[must_use]
    pub const fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

/// Ordered sequence of points for one (subject, window).
///
/// The unit returned to clients and the unit cached; superseded whole, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    /// Points sorted ascending by date, no duplicates.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Build a series from points.
    #[must_use]
    pub const fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Structural sanity check: ascending dates, no duplicates, and within
    /// the global point budget.
    ///
    /// The cache runs this on every read so a corrupt entry downgrades to a
    /// miss instead of reaching a client.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.points.len() <= MAX_SERIES_POINTS
            && self.points.windows(2).all(|pair| pair[0].date < pair[1].date)
    }
}

/// Whether a served series came from a live fetch or a stale cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Produced by the most recent successful fetch, within its TTL.
    Fresh,
    /// Served past its TTL because a refresh failed.
    Stale,
}

/// A series plus the freshness indicator: the stable response contract of
/// the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// The aggregated points.
    pub series: Series,
    /// Whether the points are live or a stale fallback.
    pub freshness: Freshness,
}

impl ChartSeries {
    /// Build a response unit.
    #[must_use]
    pub const fn new(series: Series, freshness: Freshness) -> Self {
        Self { series, freshness }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for range tokens, window bucketing, and series shapes.
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    /// Validates token parsing for the supported set.
    ///
    /// Assertions:
    /// - Confirms `7d` and `30d` parse to their ranges.
    /// - Confirms near-misses and junk are rejected with the token preserved.
    #[test]
    fn test_chart_range_parse() {
        assert_eq!(ChartRange::parse("7d").unwrap(), ChartRange::SevenDays);
        assert_eq!(ChartRange::parse("30d").unwrap(), ChartRange::ThirtyDays);

        for bad in ["", "7D", "7 d", "1y", "bogus", "30"] {
            match ChartRange::parse(bad) {
                Err(MetricsError::InvalidRange(token)) => assert_eq!(token, bad),
                other => panic!("expected InvalidRange for {bad:?}, got {other:?}"),
            }
        }
    }

    /// Validates the `FromStr` integration used by query parsing.
    ///
    /// Assertions:
    /// - Confirms `parse::<ChartRange>()` matches `ChartRange::parse`.
    #[test]
    fn test_chart_range_from_str() {
        let range: ChartRange = "30d".parse().unwrap();
        assert_eq!(range, ChartRange::ThirtyDays);
        assert_eq!(range.to_string(), "30d");
    }

    /// Validates bucket iteration over an evenly divisible window.
    ///
    /// Assertions:
    /// - Confirms seven full-day buckets, contiguous and ascending.
    #[test]
    fn test_buckets_even_window() {
        let window =
            TimeWindow::new(utc(2025, 8, 10, 0, 0, 0), utc(2025, 8, 17, 0, 0, 0), Duration::days(1));

        let buckets: Vec<Bucket> = window.buckets().collect();

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].start, window.start);
        assert_eq!(buckets[6].end, window.end);
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    /// Validates the truncated-final-bucket policy.
    ///
    /// Assertions:
    /// - Confirms the last bucket ends at the window end, not a full width
    ///   past its start.
    #[test]
    fn test_buckets_truncate_final() {
        let window =
            TimeWindow::new(utc(2025, 8, 14, 0, 0, 0), utc(2025, 8, 16, 9, 30, 0), Duration::days(1));

        let buckets: Vec<Bucket> = window.buckets().collect();

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2].start, utc(2025, 8, 16, 0, 0, 0));
        assert_eq!(buckets[2].end, window.end);
    }

    /// Validates the degenerate-width guard.
    ///
    /// Assertions:
    /// - Confirms a zero bucket width yields no buckets instead of looping.
    #[test]
    fn test_buckets_zero_width_is_empty() {
        let window =
            TimeWindow::new(utc(2025, 8, 14, 0, 0, 0), utc(2025, 8, 15, 0, 0, 0), Duration::zero());

        assert_eq!(window.bucket_count(), 0);
    }

    /// Validates day-span rounding for the upstream interval parameter.
    ///
    /// Assertions:
    /// - Confirms a partial trailing day rounds up to a whole day.
    /// - Confirms an exact multiple stays exact.
    #[test]
    fn test_days_spanned_rounds_up() {
        let partial =
            TimeWindow::new(utc(2025, 8, 14, 0, 0, 0), utc(2025, 8, 20, 15, 45, 0), Duration::days(1));
        assert_eq!(partial.days_spanned(), 7);

        let exact =
            TimeWindow::new(utc(2025, 8, 13, 0, 0, 0), utc(2025, 8, 20, 0, 0, 0), Duration::days(1));
        assert_eq!(exact.days_spanned(), 7);
    }

    /// Validates the structural sanity check the cache relies on.
    ///
    /// Assertions:
    /// - Confirms ascending unique dates pass.
    /// - Confirms duplicates and out-of-order dates fail.
    #[test]
    fn test_series_well_formed() {
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 8, d).unwrap();

        let good = Series::new(vec![
            SeriesPoint::new(date(14), 100),
            SeriesPoint::new(date(15), 101),
            SeriesPoint::new(date(16), 102),
        ]);
        assert!(good.is_well_formed());
        assert!(Series::default().is_well_formed());

        let duplicate = Series::new(vec![SeriesPoint::new(date(14), 1), SeriesPoint::new(date(14), 2)]);
        assert!(!duplicate.is_well_formed());

        let unsorted = Series::new(vec![SeriesPoint::new(date(15), 1), SeriesPoint::new(date(14), 2)]);
        assert!(!unsorted.is_well_formed());
    }

    /// Validates the wire shape of the response contract.
    ///
    /// Assertions:
    /// - Confirms a chart series serializes to the `{series, freshness}`
    ///   envelope with `YYYY-MM-DD` dates and lowercase freshness.
    #[test]
    fn test_chart_series_wire_shape() {
        let series = Series::new(vec![SeriesPoint::new(
            NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
            104,
        )]);
        let chart = ChartSeries::new(series, Freshness::Stale);

        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "series": [{"date": "2025-08-16", "count": 104}],
                "freshness": "stale"
            })
        );
    }
}
