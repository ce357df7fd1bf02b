//! Repository for the `leads` table.

use chrono::Utc;
use dealpulse_core::scoring;
use dealpulse_core::types::DbId;

use crate::models::lead::{CreateLead, Lead, UpdateLead};
use crate::store::{sort_newest_first, MemStore};

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead, scoring it once from the submitted fields.
    pub async fn create(pool: &MemStore, input: &CreateLead) -> Lead {
        let ai_score = scoring::score(&input.scoring_input());
        let now = Utc::now();
        let lead = pool
            .leads
            .insert_with(|id| Lead {
                id,
                company_name: input.company_name.trim().to_string(),
                industry: input.industry.clone(),
                employee_count: input.employee_count.clone(),
                budget_range: input.budget_range.clone(),
                timeline: input.timeline.clone(),
                interest_area: input.interest_area.clone(),
                notes: input.notes.clone(),
                ai_score,
                priority: input.priority.unwrap_or_default(),
                status: input.status.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            })
            .await;
        tracing::debug!(lead_id = lead.id, ai_score, "Lead stored");
        lead
    }

    /// Find a lead by its ID.
    pub async fn find_by_id(pool: &MemStore, id: DbId) -> Option<Lead> {
        pool.leads.get(id).await
    }

    /// List all leads, newest first.
    pub async fn list(pool: &MemStore) -> Vec<Lead> {
        let mut leads = pool.leads.all().await;
        sort_newest_first(&mut leads, |l| (l.created_at, l.id));
        leads
    }

    /// Update a lead. Only fields present in `input` are applied.
    ///
    /// The score is recomputed when the patch changes budget, timeline,
    /// employee count or industry. Returns `None` if no lead has `id`.
    pub async fn update(pool: &MemStore, id: DbId, input: &UpdateLead) -> Option<Lead> {
        let rescore = input.touches_scoring_fields();
        pool.leads
            .update_with(id, |lead| {
                if let Some(name) = &input.company_name {
                    lead.company_name = name.trim().to_string();
                }
                if let Some(v) = &input.industry {
                    lead.industry = v.clone();
                }
                if let Some(v) = &input.employee_count {
                    lead.employee_count = v.clone();
                }
                if let Some(v) = &input.budget_range {
                    lead.budget_range = v.clone();
                }
                if let Some(v) = &input.timeline {
                    lead.timeline = v.clone();
                }
                if let Some(v) = &input.interest_area {
                    lead.interest_area = v.clone();
                }
                if let Some(v) = &input.notes {
                    lead.notes = v.clone();
                }
                if let Some(v) = input.priority {
                    lead.priority = v;
                }
                if let Some(v) = input.status {
                    lead.status = v;
                }
                if rescore {
                    lead.ai_score = scoring::score(&lead.scoring_input());
                }
                lead.updated_at = Utc::now();
            })
            .await
    }

    /// Delete a lead. Deals referencing it are left alone.
    ///
    /// Returns `true` if a lead was removed.
    pub async fn delete(pool: &MemStore, id: DbId) -> bool {
        pool.leads.remove(id).await
    }
}
