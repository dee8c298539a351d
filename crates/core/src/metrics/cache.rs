//! Series cache: TTL storage with single-flight refresh coordination.
//!
//! One authoritative entry per (subject, range) key. Expiry is a wall-clock
//! comparison at read time against an injected [`Clock`]; there is no
//! background sweeper to schedule or test around. Refreshes are coordinated
//! per key so that a burst of misses costs the upstream exactly one fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chainboard_common::time::{Clock, SystemClock};
use chainboard_domain::{ChartRange, Freshness, MetricsError, Series};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Key identifying one cached series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Subject the series describes, e.g. `"miners"`.
    pub subject: String,
    /// Lookback range the series was aggregated for.
    pub range: ChartRange,
}

impl CacheKey {
    /// Build a key.
    pub fn new(subject: impl Into<String>, range: ChartRange) -> Self {
        Self { subject: subject.into(), range }
    }
}

/// One stored series and the instant it was fetched.
#[derive(Debug, Clone)]
struct CacheEntry {
    series: Series,
    fetched_at: DateTime<Utc>,
}

/// Result of a plain cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Entry present and within its TTL.
    Hit(Series),
    /// Entry present but older than the TTL. Usable only as a fallback.
    HitStale(Series),
    /// Nothing usable stored under the key.
    Miss,
}

/// TTL cache for aggregated series with per-key refresh coordination.
///
/// The entry map is the only shared mutable state on the metrics path. The
/// check-then-fetch-then-populate sequence for a key is serialized through
/// that key's flight lock, which is what upholds the
/// at-most-one-fetch-in-flight invariant under bursty traffic.
pub struct SeriesCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    // Per-key flight locks. The key domain is tiny (subjects x range
    // tokens), so locks are never reclaimed.
    flights: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SeriesCache {
    /// Create a cache with the given freshness TTL, on the system clock.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache reading time from `clock`. Tests inject a mock here.
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Look up the series stored under `key`.
    ///
    /// An entry past its TTL reads as [`CacheLookup::HitStale`]; an entry
    /// failing the structural sanity check is dropped and reads as a miss,
    /// so corruption downgrades instead of crashing the request path.
    pub async fn get(&self, key: &CacheKey) -> CacheLookup {
        let lookup = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return CacheLookup::Miss,
                Some(entry) if !entry.series.is_well_formed() => None,
                Some(entry) => Some((entry.series.clone(), self.is_expired(entry))),
            }
        };

        match lookup {
            Some((series, false)) => CacheLookup::Hit(series),
            Some((series, true)) => CacheLookup::HitStale(series),
            None => {
                warn!(subject = %key.subject, range = %key.range, "dropping malformed cache entry");
                let mut entries = self.entries.write().await;
                if entries.get(key).is_some_and(|entry| !entry.series.is_well_formed()) {
                    entries.remove(key);
                }
                CacheLookup::Miss
            }
        }
    }

    /// Store `series` under `key`, wholly replacing any prior entry.
    pub async fn put(&self, key: CacheKey, series: Series) {
        let entry = CacheEntry { series, fetched_at: self.clock.now_utc() };
        self.entries.write().await.insert(key, entry);
    }

    /// Number of stored entries, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Read through the cache, running `load` at most once per key across
    /// concurrent callers.
    ///
    /// The flow per caller:
    /// 1. A fresh entry is returned immediately.
    /// 2. Otherwise the caller races for the key's flight lock. The winner
    ///    (leader) runs `load`, stores the result, and returns it fresh.
    /// 3. Losers holding a stale entry are served it right away instead of
    ///    waiting (stale-while-revalidate). Losers with nothing wait for
    ///    the leader and reuse its result, or take over the lock and load
    ///    themselves if the leader failed, so fetches stay serialized.
    /// 4. A leader whose `load` fails falls back to the stale entry when
    ///    one exists; the error propagates only on a cold cache.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when it fails and no cached fallback
    /// exists for the key.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        key: &CacheKey,
        load: F,
    ) -> Result<(Series, Freshness), MetricsError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Series, MetricsError>> + Send,
    {
        if let CacheLookup::Hit(series) = self.get(key).await {
            debug!(subject = %key.subject, range = %key.range, "cache hit");
            return Ok((series, Freshness::Fresh));
        }

        let flight = self.flight_lock(key).await;
        let _guard = match flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // A refresh is already in flight for this key.
                match self.get(key).await {
                    CacheLookup::Hit(series) => return Ok((series, Freshness::Fresh)),
                    CacheLookup::HitStale(series) => {
                        debug!(
                            subject = %key.subject,
                            range = %key.range,
                            "refresh in flight, serving stale entry"
                        );
                        return Ok((series, Freshness::Stale));
                    }
                    CacheLookup::Miss => {
                        let guard = flight.lock().await;
                        // The leader finished while we waited; reuse its
                        // result rather than fetching again.
                        if let CacheLookup::Hit(series) = self.get(key).await {
                            return Ok((series, Freshness::Fresh));
                        }
                        // Leader failed and left nothing; take over.
                        guard
                    }
                }
            }
        };

        // Leader path: the lock was free or inherited. Re-check under the
        // lock; a previous leader may have populated between our fast-path
        // read and acquisition.
        if let CacheLookup::Hit(series) = self.get(key).await {
            return Ok((series, Freshness::Fresh));
        }

        debug!(subject = %key.subject, range = %key.range, "cache miss, loading");
        match load().await {
            Ok(series) => {
                self.put(key.clone(), series.clone()).await;
                Ok((series, Freshness::Fresh))
            }
            Err(err) if err.is_stale_recoverable() => match self.get(key).await {
                CacheLookup::Hit(series) => Ok((series, Freshness::Fresh)),
                CacheLookup::HitStale(series) => {
                    warn!(
                        subject = %key.subject,
                        range = %key.range,
                        error = %err,
                        "refresh failed, serving stale entry"
                    );
                    Ok((series, Freshness::Stale))
                }
                CacheLookup::Miss => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        let now = self.clock.now_utc();
        (now - entry.fetched_at).to_std().is_ok_and(|age| age >= self.ttl)
    }

    async fn flight_lock(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut flights = self.flights.lock().await;
        Arc::clone(flights.entry(key.clone()).or_insert_with(|| Arc::new(Mutex::new(()))))
    }
}
