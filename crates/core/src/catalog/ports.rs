//! Store traits the catalog service reads through.
//!
//! The catalog is reference data: small, embedded, and immutable for the
//! lifetime of the process. The traits stay synchronous for that reason,
//! since implementations answer from memory.

use std::sync::Arc;

use chainboard_domain::{Fip, NetworkUpgrade};

/// Read access to the network-upgrade catalog.
pub trait UpgradeStore: Send + Sync {
    /// Every upgrade in the catalog, in no particular order.
    fn all(&self) -> Vec<NetworkUpgrade>;

    /// Look up a single upgrade by its identifier.
    fn get(&self, id: &str) -> Option<NetworkUpgrade>;
}

/// Read access to the FIP catalog.
pub trait FipStore: Send + Sync {
    /// Look up a single FIP by its identifier.
    fn get(&self, id: &str) -> Option<Fip>;
}

/// Shared handle to an upgrade store.
pub type SharedUpgradeStore = Arc<dyn UpgradeStore>;

/// Shared handle to a FIP store.
pub type SharedFipStore = Arc<dyn FipStore>;
