//! Read service over the upgrade and FIP catalogs.

use chainboard_domain::{Fip, NetworkUpgrade, UpgradeDetail, UpgradeStatus, UpgradeSummary};

use super::ports::{SharedFipStore, SharedUpgradeStore};

/// Listing order: upcoming upgrades lead, then most recent target first.
const fn status_rank(status: UpgradeStatus) -> u8 {
    match status {
        UpgradeStatus::Upcoming => 0,
        UpgradeStatus::Finalized => 1,
    }
}

fn matches_query(upgrade: &NetworkUpgrade, query: &str) -> bool {
    let needle = query.to_lowercase();
    upgrade.name.to_lowercase().contains(&needle) || upgrade.version_tag().contains(&needle)
}

/// Catalog reads: upgrade listings, filtered listings, and detail lookups
/// with the FIP join resolved.
pub struct CatalogService {
    upgrades: SharedUpgradeStore,
    fips: SharedFipStore,
}

impl CatalogService {
    /// Create a service over the given stores.
    #[must_use]
    pub fn new(upgrades: SharedUpgradeStore, fips: SharedFipStore) -> Self {
        Self { upgrades, fips }
    }

    /// Every upgrade as a summary card, upcoming first, then by target time
    /// descending within each status.
    #[must_use]
    pub fn upgrades(&self) -> Vec<UpgradeSummary> {
        self.upgrades_filtered(None, None)
    }

    /// Summaries matching the given filters.
    ///
    /// `query` is a case-insensitive substring match against the display
    /// name or the `nvNN` version tag; `status` is an exact match. Absent
    /// filters match everything.
    #[must_use]
    pub fn upgrades_filtered(
        &self,
        query: Option<&str>,
        status: Option<UpgradeStatus>,
    ) -> Vec<UpgradeSummary> {
        let mut summaries: Vec<UpgradeSummary> = self
            .upgrades
            .all()
            .into_iter()
            .filter(|upgrade| status.map_or(true, |wanted| upgrade.status == wanted))
            .filter(|upgrade| query.map_or(true, |q| matches_query(upgrade, q)))
            .map(|upgrade| upgrade.summary())
            .collect();
        summaries.sort_by(|a, b| {
            status_rank(a.status)
                .cmp(&status_rank(b.status))
                .then(b.time_target.cmp(&a.time_target))
        });
        summaries
    }

    /// Detail view for one upgrade, or `None` when the id is unknown.
    ///
    /// The upgrade's FIP ids are resolved against the FIP store; ids with no
    /// record are dropped from the join rather than failing the lookup.
    #[must_use]
    pub fn upgrade(&self, id: &str) -> Option<UpgradeDetail> {
        let upgrade = self.upgrades.get(id)?;
        let fips = upgrade
            .fip_ids
            .iter()
            .filter_map(|fip_id| self.fips.get(&fip_id.to_lowercase()))
            .collect();
        Some(upgrade.into_detail(fips))
    }

    /// One FIP record, or `None` when the id is unknown. Ids match
    /// case-insensitively.
    #[must_use]
    pub fn fip(&self, id: &str) -> Option<Fip> {
        self.fips.get(&id.to_lowercase())
    }
}
