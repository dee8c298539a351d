//! # Chainboard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The metrics path: range resolution, aggregation, series cache, service
//! - The catalog path: upgrade/FIP lookup and listing
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `chainboard-common` and `chainboard-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod catalog;
pub mod metrics;

// Re-export specific items to avoid ambiguity
pub use catalog::ports::{FipStore, SharedFipStore, SharedUpgradeStore, UpgradeStore};
pub use catalog::CatalogService;
pub use metrics::aggregate::aggregate;
pub use metrics::cache::{CacheKey, CacheLookup, SeriesCache};
pub use metrics::ports::{SampleSource, SharedSampleSource};
pub use metrics::range::resolve_window;
pub use metrics::MetricsService;
