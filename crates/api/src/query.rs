//! Query parameter types shared by several handler modules.

use dealpulse_core::types::DbId;
use serde::Deserialize;

/// `?deal_id=&lead_id=` filter for activity and call-note listings.
///
/// When both are given, a record must match both.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedRecordParams {
    pub deal_id: Option<DbId>,
    pub lead_id: Option<DbId>,
}

/// `?search=` term for the lead table.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}
