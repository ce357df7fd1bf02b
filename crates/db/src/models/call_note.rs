//! Call note entity model and DTO. Call notes are append-only.

use dealpulse_core::status::Sentiment;
use dealpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `call_notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallNote {
    pub id: DbId,
    pub deal_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    /// Minutes.
    pub call_duration: Option<i32>,
    pub summary: String,
    pub key_points: Vec<String>,
    pub objections: Vec<String>,
    pub next_steps: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub coaching_notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a new call note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCallNote {
    pub deal_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub call_duration: Option<i32>,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub objections: Vec<String>,
    pub next_steps: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub coaching_notes: Option<String>,
}
