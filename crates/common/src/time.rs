//! Wall-clock abstraction for testability.
//!
//! Window resolution ("last 7 days ending now") and cache expiry ("entry
//! older than its TTL") both compare wall-clock timestamps. Routing those
//! reads through a trait lets tests pin the clock to a known date and
//! advance it manually instead of sleeping.
//!
//! # Examples
//!
//! ```
//! use chainboard_common::time::{Clock, MockClock, SystemClock};
//! use chrono::{Duration, TimeZone, Timelike, Utc};
//!
//! // Production code takes the system clock.
//! let clock = SystemClock;
//! let _now = clock.now_utc();
//!
//! // Tests pin time and move it explicitly.
//! let mock = MockClock::at(Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap());
//! mock.advance(Duration::minutes(5));
//! assert_eq!(mock.now_utc().minute(), 5);
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock. Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Controllable clock for deterministic tests.
///
/// Starts at a fixed instant and only moves when told to via [`advance`] or
/// [`set`]. Cloning shares the underlying time, so a clone handed to the
/// code under test can be driven from the test body.
///
/// [`advance`]: MockClock::advance
/// [`set`]: MockClock::set
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock starting at the real current time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a mock clock pinned to a specific instant.
    #[must_use]
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut current = self.current.lock().expect("mutex poisoned");
        *current += delta;
    }

    /// Jump the clock to an absolute instant, replacing the current time.
    pub fn set(&self, to: DateTime<Utc>) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut current = self.current.lock().expect("mutex poisoned");
        *current = to;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.current.lock().expect("mutex poisoned")
    }
}
