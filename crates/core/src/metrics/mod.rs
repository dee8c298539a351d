//! The metrics query path.
//!
//! A request travels: range token → [`range::resolve_window`] → cache lookup
//! → on miss, one upstream fetch through the [`ports::SampleSource`] port →
//! [`aggregate::aggregate`] → cache store → response. The
//! [`cache::SeriesCache`] owns the two hard guarantees on that path:
//! at-most-one-fetch-in-flight per key and stale-serve when a refresh fails.

pub mod aggregate;
pub mod cache;
pub mod ports;
pub mod range;
pub mod service;

pub use service::MetricsService;
