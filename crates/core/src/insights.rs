//! Dashboard insights derived from the local leads and deals.
//!
//! Besides the three insight cards this module holds the lead-table
//! helpers: search filtering and CSV export.

use serde::Serialize;

use crate::record::{DealRecord, LeadRecord};
use crate::scoring::HOT_LEAD_THRESHOLD;
use crate::staleness::{rank_silent, SilenceClassification};
use crate::types::Timestamp;

/// Deals with a health score below this are at risk.
pub const AT_RISK_HEALTH_THRESHOLD: i32 = 60;

/// How many company names the silent-deal card lists before "and N more".
const SILENT_CARD_NAMES: usize = 3;

/// How many company names the hot-lead card lists before "and N more".
const HOT_CARD_NAMES: usize = 2;

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// Leads whose qualification score marks them as hot.
pub fn hot_leads<L: LeadRecord>(leads: &[L]) -> Vec<&L> {
    leads
        .iter()
        .filter(|l| l.ai_score() >= HOT_LEAD_THRESHOLD)
        .collect()
}

/// Deals whose health score has dropped below the risk threshold.
pub fn at_risk_deals<D: DealRecord>(deals: &[D]) -> Vec<&D> {
    deals
        .iter()
        .filter(|d| d.health_score() < AT_RISK_HEALTH_THRESHOLD)
        .collect()
}

/// Silent deals, most neglected first.
pub fn silent_deals<D: DealRecord>(deals: &[D], now: Timestamp) -> Vec<(&D, SilenceClassification)> {
    rank_silent(deals.iter().collect(), |d| d.last_contact_date(), now)
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Which insight a card reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Silent deals that need a follow-up.
    Priority,
    /// Hot leads ready for a call.
    Opportunity,
    /// Deals with failing health.
    Risk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightCard {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
    pub count: usize,
}

/// `"A, B, C and 2 more"` style listing of the first `shown` names.
fn name_list(names: &[&str], shown: usize) -> String {
    let mut listed = names.iter().take(shown).copied().collect::<Vec<_>>().join(", ");
    if names.len() > shown {
        listed.push_str(&format!(" and {} more", names.len() - shown));
    }
    listed
}

/// Build the three dashboard insight cards.
pub fn build_insight_cards<L, D>(leads: &[L], deals: &[D], now: Timestamp) -> Vec<InsightCard>
where
    L: LeadRecord,
    D: DealRecord,
{
    let silent = silent_deals(deals, now);
    let silent_names: Vec<&str> = silent.iter().map(|(d, _)| d.company_name()).collect();

    let hot = hot_leads(leads);
    let hot_names: Vec<&str> = hot.iter().map(|l| l.company_name()).collect();

    let at_risk = at_risk_deals(deals);

    vec![
        InsightCard {
            kind: InsightKind::Priority,
            title: "Silent Deals Alert".to_string(),
            description: format!(
                "{} deals haven't been contacted in 5+ days. {} need immediate attention.",
                silent.len(),
                name_list(&silent_names, SILENT_CARD_NAMES),
            ),
            action: "Contact Now".to_string(),
            count: silent.len(),
        },
        InsightCard {
            kind: InsightKind::Opportunity,
            title: "Hot Leads Ready".to_string(),
            description: format!(
                "{} leads scored {HOT_LEAD_THRESHOLD}+ in qualification. {} have high budget and immediate timeline.",
                hot.len(),
                name_list(&hot_names, HOT_CARD_NAMES),
            ),
            action: "Schedule Calls".to_string(),
            count: hot.len(),
        },
        InsightCard {
            kind: InsightKind::Risk,
            title: "Deal Health Monitor".to_string(),
            description: format!(
                "{} deals showing decreased engagement scores. Consider value reinforcement strategy and stakeholder mapping.",
                at_risk.len(),
            ),
            action: "Review Strategy".to_string(),
            count: at_risk.len(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Lead table helpers
// ---------------------------------------------------------------------------

/// Case-insensitive search on company name or industry.
///
/// An empty or whitespace-only term matches everything.
pub fn filter_leads<'a, L: LeadRecord>(leads: &'a [L], term: &str) -> Vec<&'a L> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return leads.iter().collect();
    }
    leads
        .iter()
        .filter(|l| {
            l.company_name().to_lowercase().contains(&needle)
                || l
                    .industry()
                    .is_some_and(|i| i.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Header row of the lead CSV export.
pub const LEAD_CSV_HEADER: &str = "Company,Industry,AI Score,Budget,Timeline,Status";

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render leads as CSV, one row per lead after the header.
pub fn leads_to_csv<L: LeadRecord>(leads: &[&L]) -> String {
    let mut out = String::from(LEAD_CSV_HEADER);
    for lead in leads {
        let row = [
            csv_field(lead.company_name()),
            csv_field(lead.industry().unwrap_or("")),
            lead.ai_score().to_string(),
            csv_field(lead.budget_range().unwrap_or("")),
            csv_field(lead.timeline().unwrap_or("")),
            lead.status().to_string(),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
