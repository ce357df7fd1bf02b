//! Read-only views of store records used by the aggregation and insight
//! functions.

use crate::status::{DealStage, LeadStatus};
use crate::types::{Cents, Timestamp};

/// The lead fields domain logic reads.
pub trait LeadRecord {
    fn company_name(&self) -> &str;
    fn industry(&self) -> Option<&str>;
    fn budget_range(&self) -> Option<&str>;
    fn timeline(&self) -> Option<&str>;
    fn status(&self) -> LeadStatus;
    fn ai_score(&self) -> i32;
}

/// The deal fields domain logic reads.
pub trait DealRecord {
    fn company_name(&self) -> &str;
    fn stage(&self) -> DealStage;
    fn value_cents(&self) -> Cents;
    fn health_score(&self) -> i32;
    fn last_contact_date(&self) -> Option<Timestamp>;
}
