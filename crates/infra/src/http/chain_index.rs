//! Chain-index HTTP client
//!
//! Implements [`SampleSource`] against the chain-index daily-counts endpoint:
//! `GET {base}/{subject}?interval={days}d` answering a JSON array of
//! `{date, count, ...}` rows. Extra row fields are tolerated and ignored.
//!
//! The client owns its request deadline and never retries; classifying a
//! failure and deciding whether a stale cached series may stand in for it is
//! the caller's job.

use async_trait::async_trait;
use chainboard_core::SampleSource;
use chainboard_domain::{ChainboardError, MetricsError, Sample, TimeWindow, UpstreamConfig};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// Client for the chain-index observation feed.
#[derive(Debug)]
pub struct ChainIndexClient {
    client: reqwest::Client,
    /// Normalized base URL, no trailing slash.
    base_url: String,
}

impl ChainIndexClient {
    /// Build a client from upstream settings.
    ///
    /// # Errors
    /// Returns `ChainboardError::Config` if the base URL does not parse, or
    /// a network-mapped error if the HTTP client cannot be constructed.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ChainboardError> {
        Url::parse(&config.base_url).map_err(|e| {
            ChainboardError::Config(format!("Invalid upstream base URL {:?}: {e}", config.base_url))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .no_proxy()
            .build()
            .map_err(|err| {
                let infra: InfraError = err.into();
                ChainboardError::from(infra)
            })?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl SampleSource for ChainIndexClient {
    async fn fetch(
        &self,
        subject: &str,
        window: &TimeWindow,
    ) -> Result<Vec<Sample>, MetricsError> {
        let interval = format!("{}d", window.days_spanned());
        let url = format!("{}/{subject}", self.base_url);

        debug!(%url, %interval, "querying chain index");

        let response = self
            .client
            .get(&url)
            .query(&[("interval", interval.as_str())])
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetricsError::UpstreamUnavailable { status: status.as_u16() });
        }

        let rows: Vec<ObservationRow> = response.json().await.map_err(|err| {
            if err.is_timeout() {
                transport_error(&err)
            } else {
                MetricsError::UpstreamBadResponse(format!("invalid JSON body: {err}"))
            }
        })?;

        let mut samples = rows
            .into_iter()
            .map(ObservationRow::into_sample)
            .collect::<Result<Vec<_>, MetricsError>>()?;
        samples.sort_by_key(|sample| sample.timestamp);

        debug!(rows = samples.len(), "chain index rows decoded");
        Ok(samples)
    }
}

/// Classify a reqwest failure on the request path.
fn transport_error(err: &reqwest::Error) -> MetricsError {
    if err.is_timeout() {
        MetricsError::UpstreamTimeout("deadline exceeded".to_string())
    } else if err.is_connect() {
        MetricsError::UpstreamTimeout(format!("connection failed: {err}"))
    } else {
        MetricsError::UpstreamTimeout(err.to_string())
    }
}

/// One row of the upstream daily-counts payload.
///
/// The upstream also emits a `cost` field per row; it plays no part in the
/// series and is dropped during deserialization.
#[derive(Debug, Deserialize)]
struct ObservationRow {
    date: String,
    count: i64,
}

impl ObservationRow {
    /// Validate the row and convert it into a midnight-UTC sample.
    fn into_sample(self) -> Result<Sample, MetricsError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            MetricsError::UpstreamBadResponse(format!("invalid date {:?}: {e}", self.date))
        })?;

        let count = u64::try_from(self.count).map_err(|_| {
            MetricsError::UpstreamBadResponse(format!(
                "negative count {} on {}",
                self.count, self.date
            ))
        })?;

        Ok(Sample::new(date.and_time(chrono::NaiveTime::MIN).and_utc(), count))
    }
}
