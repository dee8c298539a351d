//! Domain types and models

pub mod fip;
pub mod metrics;
pub mod upgrade;

// Re-export the working set so callers can use `chainboard_domain::Series`
// instead of spelling out the module path.
pub use fip::Fip;
pub use metrics::{
    Bucket, Buckets, ChartRange, ChartSeries, Freshness, Sample, Series, SeriesPoint, TimeWindow,
};
pub use upgrade::{NetworkUpgrade, UpgradeDetail, UpgradeStatus, UpgradeSummary};
