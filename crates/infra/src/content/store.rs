//! Catalog store backed by JSON compiled into the binary
//!
//! Upgrade and FIP records change only when new governance content ships, so
//! they ride along with the binary instead of living in an external database.
//! Both payloads are parsed once at startup; a malformed record fails the
//! whole boot rather than surfacing per-request.

use std::collections::HashMap;

use chainboard_core::{FipStore, UpgradeStore};
use chainboard_domain::{ChainboardError, Fip, NetworkUpgrade, Result};
use tracing::info;

const UPGRADES_JSON: &str = include_str!("data/upgrades.json");
const FIPS_JSON: &str = include_str!("data/fips.json");

/// Upgrade and FIP catalog parsed from the embedded payloads.
#[derive(Debug)]
pub struct EmbeddedContentStore {
    upgrades: Vec<NetworkUpgrade>,
    /// FIP records keyed by lowercase id.
    fips: HashMap<String, Fip>,
}

impl EmbeddedContentStore {
    /// Parse the embedded payloads.
    ///
    /// # Errors
    /// Returns `ChainboardError::Content` if either payload fails to decode.
    pub fn new() -> Result<Self> {
        let store = Self::from_json(UPGRADES_JSON, FIPS_JSON)?;
        info!(
            upgrades = store.upgrades.len(),
            fips = store.fips.len(),
            "embedded catalog loaded"
        );
        Ok(store)
    }

    fn from_json(upgrades_json: &str, fips_json: &str) -> Result<Self> {
        let upgrades: Vec<NetworkUpgrade> = serde_json::from_str(upgrades_json)
            .map_err(|e| ChainboardError::Content(format!("Invalid upgrades payload: {e}")))?;

        let fip_records: Vec<Fip> = serde_json::from_str(fips_json)
            .map_err(|e| ChainboardError::Content(format!("Invalid FIPs payload: {e}")))?;
        let fips = fip_records.into_iter().map(|fip| (fip.id.to_lowercase(), fip)).collect();

        Ok(Self { upgrades, fips })
    }
}

impl UpgradeStore for EmbeddedContentStore {
    fn all(&self) -> Vec<NetworkUpgrade> {
        self.upgrades.clone()
    }

    fn get(&self, id: &str) -> Option<NetworkUpgrade> {
        self.upgrades.iter().find(|upgrade| upgrade.id == id).cloned()
    }
}

impl FipStore for EmbeddedContentStore {
    fn get(&self, id: &str) -> Option<Fip> {
        self.fips.get(id).cloned()
    }
}
