//! In-memory mock for the `SampleSource` port.
//!
//! Deterministic by default; tests can add latency or arm a failure to
//! exercise the cache's fallback paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chainboard_common::time::MockClock;
use chainboard_core::SampleSource;
use chainboard_domain::{MetricsError, Sample, TimeWindow};
use chrono::{TimeZone, Utc};

/// In-memory mock for `SampleSource`.
///
/// Serves a fixed sample set, counts fetches, and records the window of
/// every call so tests can assert what the service asked for.
pub struct MockSampleSource {
    samples: Mutex<Vec<Sample>>,
    failure: Mutex<Option<MetricsError>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
    windows: Mutex<Vec<TimeWindow>>,
}

impl MockSampleSource {
    /// Create a mock seeded with the provided samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples: Mutex::new(samples),
            failure: Mutex::new(None),
            delay: None,
            fetches: AtomicUsize::new(0),
            windows: Mutex::new(Vec::new()),
        }
    }

    /// Add artificial latency to every fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Arm (or clear) a failure returned by subsequent fetches.
    pub fn set_failure(&self, error: Option<MetricsError>) {
        *self.failure.lock().expect("failure lock poisoned") = error;
    }

    /// Replace the served samples.
    pub fn set_samples(&self, samples: Vec<Sample>) {
        *self.samples.lock().expect("samples lock poisoned") = samples;
    }

    /// How many fetches have been issued.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Every window the service has fetched with, in call order.
    pub fn recorded_windows(&self) -> Vec<TimeWindow> {
        self.windows.lock().expect("windows lock poisoned").clone()
    }
}

#[async_trait]
impl SampleSource for MockSampleSource {
    async fn fetch(&self, _subject: &str, window: &TimeWindow) -> Result<Vec<Sample>, MetricsError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().expect("windows lock poisoned").push(window.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failure.lock().expect("failure lock poisoned").clone() {
            return Err(error);
        }
        Ok(self.samples.lock().expect("samples lock poisoned").clone())
    }
}

/// Clock pinned to 2025-08-20 15:30 UTC, the fixture instant the sample
/// builders below are written against.
pub fn pinned_clock() -> MockClock {
    MockClock::at(Utc.with_ymd_and_hms(2025, 8, 20, 15, 30, 0).unwrap())
}

/// One observation per day at 08:00 UTC, ending on 2025-08-20, one count per
/// entry in `counts` (oldest first).
pub fn daily_samples(counts: &[u64]) -> Vec<Sample> {
    counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| {
            let day = chrono::NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
                - chrono::Days::new((counts.len() - 1 - idx) as u64);
            Sample::new(day.and_hms_opt(8, 0, 0).unwrap().and_utc(), count)
        })
        .collect()
}
