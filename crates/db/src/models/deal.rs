//! Deal entity model and DTOs.

use dealpulse_core::record::DealRecord;
use dealpulse_core::status::DealStage;
use dealpulse_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// Default win probability for a new deal, in percent.
pub const DEFAULT_PROBABILITY: i32 = 25;

/// Default health score for a new deal.
pub const DEFAULT_HEALTH_SCORE: i32 = 50;

/// A row from the `deals` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DbId,
    /// Soft reference; the lead may have been deleted.
    pub lead_id: Option<DbId>,
    pub company_name: String,
    /// Amount in cents.
    pub value: Cents,
    pub stage: DealStage,
    pub probability: i32,
    pub close_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub last_contact_date: Option<Timestamp>,
    pub health_score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DealRecord for Deal {
    fn company_name(&self) -> &str {
        &self.company_name
    }

    fn stage(&self) -> DealStage {
        self.stage
    }

    fn value_cents(&self) -> Cents {
        self.value
    }

    fn health_score(&self) -> i32 {
        self.health_score
    }

    fn last_contact_date(&self) -> Option<Timestamp> {
        self.last_contact_date
    }
}

/// DTO for creating a new deal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeal {
    pub lead_id: Option<DbId>,
    pub company_name: String,
    pub value: Cents,
    pub stage: DealStage,
    /// Defaults to [`DEFAULT_PROBABILITY`] if omitted.
    pub probability: Option<i32>,
    pub close_date: Option<Timestamp>,
    pub notes: Option<String>,
    /// Defaults to the creation time if omitted.
    pub last_contact_date: Option<Timestamp>,
    /// Defaults to [`DEFAULT_HEALTH_SCORE`] if omitted.
    pub health_score: Option<i32>,
}

/// DTO for updating an existing deal. All fields are optional; `null`
/// clears the nullable ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeal {
    #[serde(default, deserialize_with = "super::nullable")]
    pub lead_id: Option<Option<DbId>>,
    pub company_name: Option<String>,
    pub value: Option<Cents>,
    pub stage: Option<DealStage>,
    pub probability: Option<i32>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub close_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub last_contact_date: Option<Option<Timestamp>>,
    pub health_score: Option<i32>,
}
