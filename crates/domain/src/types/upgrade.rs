//! Network upgrade records.
//!
//! An upgrade ties a network version bump to its improvement proposals and
//! node release metadata. Records come from the embedded catalog; optional
//! fields decode to the same fallbacks the dashboard has always displayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UPGRADE_NOTES;
use crate::types::fip::Fip;

/// Lifecycle state of a tracked upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpgradeStatus {
    /// Scheduled but not yet live.
    #[default]
    Upcoming,
    /// Activated on the network.
    Finalized,
}

/// One tracked network upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkUpgrade {
    /// Stable kebab-case identifier, e.g. `"tuk-tuk"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Network version this upgrade activates.
    pub network_version: u32,
    /// Chain the record refers to (`"Mainnet"`, `"Calibration"`).
    pub chain: String,
    /// Epoch at which the upgrade activates.
    pub epoch_target: u64,
    /// Wall-clock target corresponding to the epoch.
    pub time_target: DateTime<Utc>,
    /// Lifecycle state; records may omit it and default to upcoming.
    #[serde(default)]
    pub status: UpgradeStatus,
    /// Lotus release shipping the upgrade, when cut.
    #[serde(default)]
    pub lotus_release_tag: Option<String>,
    #[serde(default)]
    pub lotus_release_url: Option<String>,
    /// Venus release shipping the upgrade, when cut.
    #[serde(default)]
    pub venus_release_tag: Option<String>,
    #[serde(default)]
    pub venus_release_url: Option<String>,
    /// Links to specs and discussion threads.
    #[serde(default)]
    pub specs: Vec<String>,
    /// Free-form operator notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Ids of the FIPs bundled into this upgrade.
    #[serde(default)]
    pub fip_ids: Vec<String>,
}

impl NetworkUpgrade {
    /// Network version tag as displayed, e.g. `"nv25"`.
    #[must_use]
    pub fn version_tag(&self) -> String {
        format!("nv{}", self.network_version)
    }

    /// Card view for listings.
    #[must_use]
    pub fn summary(&self) -> UpgradeSummary {
        UpgradeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            network_version: self.network_version,
            chain: self.chain.clone(),
            time_target: self.time_target,
            status: self.status,
            fip_count: self.fip_ids.len(),
        }
    }

    /// Detail view with fallbacks applied and the FIP join resolved.
    #[must_use]
    pub fn into_detail(self, fips: Vec<Fip>) -> UpgradeDetail {
        UpgradeDetail {
            id: self.id,
            name: self.name,
            network_version: self.network_version,
            chain: self.chain,
            epoch_target: self.epoch_target,
            time_target: self.time_target,
            status: self.status,
            lotus_release_tag: self.lotus_release_tag,
            lotus_release_url: self.lotus_release_url,
            venus_release_tag: self.venus_release_tag,
            venus_release_url: self.venus_release_url,
            specs: self.specs,
            notes: self.notes.unwrap_or_else(|| DEFAULT_UPGRADE_NOTES.to_string()),
            fips,
        }
    }
}

/// Compact upgrade view for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSummary {
    pub id: String,
    pub name: String,
    pub network_version: u32,
    pub chain: String,
    pub time_target: DateTime<Utc>,
    pub status: UpgradeStatus,
    /// How many FIPs the upgrade bundles.
    pub fip_count: usize,
}

/// Full upgrade view for detail responses: fallbacks applied, FIPs joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeDetail {
    pub id: String,
    pub name: String,
    pub network_version: u32,
    pub chain: String,
    pub epoch_target: u64,
    pub time_target: DateTime<Utc>,
    pub status: UpgradeStatus,
    pub lotus_release_tag: Option<String>,
    pub lotus_release_url: Option<String>,
    pub venus_release_tag: Option<String>,
    pub venus_release_url: Option<String>,
    pub specs: Vec<String>,
    /// Never empty: records without notes get the standard placeholder.
    pub notes: String,
    /// Resolved FIP records; ids that do not exist in the catalog are
    /// dropped from the join rather than failing the lookup.
    pub fips: Vec<Fip>,
}
