//! Improvement proposal (FIP) records.

use serde::{Deserialize, Serialize};

/// One improvement-proposal record linked from upgrade pages.
///
/// Ids are lowercase (`"fip-0103"`, `"frc-0108"`); lookups normalize case
/// before matching so `FIP-0103` finds the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fip {
    /// Lowercase identifier, e.g. `"fip-0086"`.
    pub id: String,
    /// Proposal title.
    pub title: String,
    /// Short summary of what the proposal changes.
    #[serde(default)]
    pub description: String,
    /// Proposal track (`"Technical"`, `"Economic"`, ...).
    #[serde(default)]
    pub category: Option<String>,
    /// FIP process status (`"Final"`, `"Accepted"`, ...).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    /// Link to the discussion thread.
    #[serde(default)]
    pub discussion_url: Option<String>,
}
