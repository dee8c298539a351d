//! Application context - dependency injection container

use std::sync::Arc;

use chainboard_core::{
    CatalogService, MetricsService, SharedFipStore, SharedSampleSource, SharedUpgradeStore,
};
use chainboard_domain::{AppConfig, Result};
use chainboard_infra::{ChainIndexClient, EmbeddedContentStore};

/// Application context - holds all services and dependencies
///
/// Constructed once at startup from the loaded configuration and shared with
/// every request handler. Nothing below this layer reads the environment.
pub struct AppContext {
    /// Configuration the context was built from.
    pub config: AppConfig,
    /// Metrics query service (cache, aggregation, upstream fetch).
    pub metrics: Arc<MetricsService>,
    /// Upgrade and FIP catalog service.
    pub catalog: Arc<CatalogService>,
}

impl AppContext {
    /// Wire all services against their production implementations.
    ///
    /// # Errors
    /// Returns a `ChainboardError` if the upstream client cannot be built
    /// from the configured base URL or the embedded catalog fails to parse.
    pub fn new(config: AppConfig) -> Result<Self> {
        let source: SharedSampleSource = Arc::new(ChainIndexClient::new(&config.upstream)?);
        let metrics = Arc::new(MetricsService::new(source, config.cache.ttl()));

        let content = Arc::new(EmbeddedContentStore::new()?);
        let upgrades: SharedUpgradeStore = content.clone();
        let fips: SharedFipStore = content;
        let catalog = Arc::new(CatalogService::new(upgrades, fips));

        Ok(Self { config, metrics, catalog })
    }
}
