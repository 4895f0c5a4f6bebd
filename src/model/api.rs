use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The gateway's record of a single published API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    /// Server-assigned ARM id, absent on descriptors built locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Always asserted on upsert; historical revisions are never created
    pub is_current: bool,
    pub subscription_required: bool,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path: String,
    pub protocols: BTreeSet<String>,
}
