//! Activity entity model and DTO. Activities are append-only.

use dealpulse_core::status::ActivityType;
use dealpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `activities` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: DbId,
    pub deal_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub outcome: Option<String>,
    pub next_steps: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for logging a new activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub deal_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub outcome: Option<String>,
    pub next_steps: Option<String>,
}
