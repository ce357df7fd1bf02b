//! Lead entity model and DTOs.

use dealpulse_core::record::LeadRecord;
use dealpulse_core::scoring::ScoringInput;
use dealpulse_core::status::{LeadStatus, Priority};
use dealpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `leads` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: DbId,
    pub company_name: String,
    pub industry: Option<String>,
    pub employee_count: Option<String>,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub interest_area: Option<String>,
    pub notes: Option<String>,
    /// Qualification score in `[0, 100]`, computed by the store.
    pub ai_score: i32,
    pub priority: Priority,
    pub status: LeadStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    pub fn scoring_input(&self) -> ScoringInput<'_> {
        ScoringInput {
            budget_range: self.budget_range.as_deref(),
            timeline: self.timeline.as_deref(),
            employee_count: self.employee_count.as_deref(),
            industry: self.industry.as_deref(),
        }
    }
}

impl LeadRecord for Lead {
    fn company_name(&self) -> &str {
        &self.company_name
    }

    fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    fn budget_range(&self) -> Option<&str> {
        self.budget_range.as_deref()
    }

    fn timeline(&self) -> Option<&str> {
        self.timeline.as_deref()
    }

    fn status(&self) -> LeadStatus {
        self.status
    }

    fn ai_score(&self) -> i32 {
        self.ai_score
    }
}

/// DTO for creating a new lead. The score is never accepted from callers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLead {
    pub company_name: String,
    pub industry: Option<String>,
    pub employee_count: Option<String>,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub interest_area: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<Priority>,
    /// Defaults to `new` if omitted.
    pub status: Option<LeadStatus>,
}

impl CreateLead {
    pub fn scoring_input(&self) -> ScoringInput<'_> {
        ScoringInput {
            budget_range: self.budget_range.as_deref(),
            timeline: self.timeline.as_deref(),
            employee_count: self.employee_count.as_deref(),
            industry: self.industry.as_deref(),
        }
    }
}

/// DTO for updating an existing lead. All fields are optional; `null`
/// clears the nullable ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub employee_count: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub budget_range: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub timeline: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub interest_area: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub notes: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<LeadStatus>,
}

impl UpdateLead {
    /// Whether the patch changes any field the score depends on.
    pub fn touches_scoring_fields(&self) -> bool {
        self.budget_range.is_some()
            || self.timeline.is_some()
            || self.employee_count.is_some()
            || self.industry.is_some()
    }
}
