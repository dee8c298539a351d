//! Configuration structures
//!
//! Typed configuration injected at construction time. Nothing on the
//! request path reads ambient global state; the loader in the infra crate
//! builds one of these from defaults, an optional config file, and the
//! environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_LISTEN_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    DEFAULT_UPSTREAM_URL,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds.
    pub listen_addr: SocketAddr,
    /// Upstream chain-index service settings.
    pub upstream: UpstreamConfig,
    /// Series cache settings.
    pub cache: CacheConfig,
}

/// Upstream chain-index service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the chain-index service.
    pub base_url: String,
    /// Per-request deadline in seconds. The fetch path must never block
    /// unbounded on the upstream.
    pub timeout_secs: u64,
}

/// Series cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a cached series counts as fresh, in seconds.
    pub ttl_secs: u64,
}

impl UpstreamConfig {
    /// Per-request deadline as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    /// Freshness TTL as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: DEFAULT_CACHE_TTL_SECS }
    }
}

const fn default_listen_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_LISTEN_PORT)
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration defaults and file decoding.
    use super::*;

    /// Validates the zero-config defaults.
    ///
    /// Assertions:
    /// - Confirms the documented local defaults for listen address,
    ///   upstream URL, timeout, and cache TTL.
    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();

        assert_eq!(config.listen_addr.port(), DEFAULT_LISTEN_PORT);
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
    }

    /// Validates partial deserialization against the defaults.
    ///
    /// Assertions:
    /// - Confirms omitted sections fall back to their defaults while
    ///   provided fields take effect.
    #[test]
    fn test_partial_file_overlays_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"upstream": {"base_url": "http://indexer:9000"}}"#).unwrap();

        assert_eq!(config.upstream.base_url, "http://indexer:9000");
        assert_eq!(config.upstream.timeout_secs, DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(config.cache.ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(config.listen_addr, default_listen_addr());
    }
}
