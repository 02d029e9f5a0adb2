// shared/src/models/sync.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sync status response
///
/// Lets the extension show how many orders the backend has taken in today
/// and since it started.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusResponse {
    /// Time of the most recent accepted order (`null` before the first one)
    pub last_sync_timestamp: Option<DateTime<Utc>>,
    pub orders_processed_today: u64,
    pub orders_processed_total: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending_errors: Vec<String>,
    /// `operational` | `degraded`
    pub status: String,
}
