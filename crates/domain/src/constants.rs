//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Metrics path
/// Hard ceiling on points in any served series. Every supported range must
/// resolve to a bucket count at or under this bound; it is what keeps
/// response size and upstream query fan-out bounded.
pub const MAX_SERIES_POINTS: usize = 90;
/// The one subject the dashboard charts today.
pub const MINERS_SUBJECT: &str = "miners";

// Upstream chain-index service
/// Local development default for the chain-index base URL.
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:10086";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

// Series cache
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// HTTP server
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

// Catalog fallbacks (what the dashboard shows when a record omits a field)
pub const DEFAULT_UPGRADE_NOTES: &str = "No additional notes.";
