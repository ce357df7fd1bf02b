//! Repository for the append-only `activities` table.

use chrono::Utc;
use dealpulse_core::types::DbId;

use crate::models::activity::{Activity, CreateActivity};
use crate::store::{sort_newest_first, MemStore};

/// Provides insert and list operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Log a new activity, returning the stored row.
    pub async fn create(pool: &MemStore, input: &CreateActivity) -> Activity {
        let now = Utc::now();
        pool.activities
            .insert_with(|id| Activity {
                id,
                deal_id: input.deal_id,
                lead_id: input.lead_id,
                activity_type: input.activity_type,
                description: input.description.clone(),
                outcome: input.outcome.clone(),
                next_steps: input.next_steps.clone(),
                created_at: now,
            })
            .await
    }

    /// List all activities, newest first.
    pub async fn list(pool: &MemStore) -> Vec<Activity> {
        Self::list_matching(pool, None, None).await
    }

    /// List the activities linked to a deal, newest first.
    pub async fn list_by_deal(pool: &MemStore, deal_id: DbId) -> Vec<Activity> {
        Self::list_matching(pool, Some(deal_id), None).await
    }

    /// List the activities linked to a lead, newest first.
    pub async fn list_by_lead(pool: &MemStore, lead_id: DbId) -> Vec<Activity> {
        Self::list_matching(pool, None, Some(lead_id)).await
    }

    /// List activities matching every given link, newest first.
    pub async fn list_matching(
        pool: &MemStore,
        deal_id: Option<DbId>,
        lead_id: Option<DbId>,
    ) -> Vec<Activity> {
        let mut rows = pool
            .activities
            .filter(|a| {
                deal_id.map_or(true, |id| a.deal_id == Some(id))
                    && lead_id.map_or(true, |id| a.lead_id == Some(id))
            })
            .await;
        sort_newest_first(&mut rows, |a| (a.created_at, a.id));
        rows
    }
}
