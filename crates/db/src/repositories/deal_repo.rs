//! Repository for the `deals` table.

use chrono::Utc;
use dealpulse_core::status::DealStage;
use dealpulse_core::types::DbId;

use crate::models::deal::{CreateDeal, Deal, UpdateDeal, DEFAULT_HEALTH_SCORE, DEFAULT_PROBABILITY};
use crate::store::{sort_newest_first, MemStore};

/// Provides CRUD operations for deals.
pub struct DealRepo;

impl DealRepo {
    /// Insert a new deal, returning the stored row.
    ///
    /// Missing probability and health score take their defaults, and a
    /// missing last contact date is set to now.
    pub async fn create(pool: &MemStore, input: &CreateDeal) -> Deal {
        let now = Utc::now();
        pool.deals
            .insert_with(|id| Deal {
                id,
                lead_id: input.lead_id,
                company_name: input.company_name.trim().to_string(),
                value: input.value,
                stage: input.stage,
                probability: input.probability.unwrap_or(DEFAULT_PROBABILITY),
                close_date: input.close_date,
                notes: input.notes.clone(),
                last_contact_date: Some(input.last_contact_date.unwrap_or(now)),
                health_score: input.health_score.unwrap_or(DEFAULT_HEALTH_SCORE),
                created_at: now,
                updated_at: now,
            })
            .await
    }

    /// Find a deal by its ID.
    pub async fn find_by_id(pool: &MemStore, id: DbId) -> Option<Deal> {
        pool.deals.get(id).await
    }

    /// List all deals, newest first.
    pub async fn list(pool: &MemStore) -> Vec<Deal> {
        let mut deals = pool.deals.all().await;
        sort_newest_first(&mut deals, |d| (d.created_at, d.id));
        deals
    }

    /// List the deals in one stage, newest first.
    pub async fn list_by_stage(pool: &MemStore, stage: DealStage) -> Vec<Deal> {
        let mut deals = pool.deals.filter(|d| d.stage == stage).await;
        sort_newest_first(&mut deals, |d| (d.created_at, d.id));
        deals
    }

    /// Update a deal. Only fields present in `input` are applied.
    ///
    /// Returns `None` if no deal has `id`.
    pub async fn update(pool: &MemStore, id: DbId, input: &UpdateDeal) -> Option<Deal> {
        pool.deals
            .update_with(id, |deal| {
                if let Some(v) = input.lead_id {
                    deal.lead_id = v;
                }
                if let Some(name) = &input.company_name {
                    deal.company_name = name.trim().to_string();
                }
                if let Some(v) = input.value {
                    deal.value = v;
                }
                if let Some(v) = input.stage {
                    deal.stage = v;
                }
                if let Some(v) = input.probability {
                    deal.probability = v;
                }
                if let Some(v) = input.close_date {
                    deal.close_date = v;
                }
                if let Some(v) = &input.notes {
                    deal.notes = v.clone();
                }
                if let Some(v) = input.last_contact_date {
                    deal.last_contact_date = v;
                }
                if let Some(v) = input.health_score {
                    deal.health_score = v;
                }
                deal.updated_at = Utc::now();
            })
            .await
    }

    /// Delete a deal. Returns `true` if a deal was removed.
    pub async fn delete(pool: &MemStore, id: DbId) -> bool {
        pool.deals.remove(id).await
    }
}
