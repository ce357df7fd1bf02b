//! Repository for the append-only `call_notes` table.

use chrono::Utc;
use dealpulse_core::types::DbId;

use crate::models::call_note::{CallNote, CreateCallNote};
use crate::store::{sort_newest_first, MemStore};

/// Provides insert and list operations for call notes.
pub struct CallNoteRepo;

impl CallNoteRepo {
    /// Record a new call note, returning the stored row.
    pub async fn create(pool: &MemStore, input: &CreateCallNote) -> CallNote {
        let now = Utc::now();
        pool.call_notes
            .insert_with(|id| CallNote {
                id,
                deal_id: input.deal_id,
                lead_id: input.lead_id,
                call_duration: input.call_duration,
                summary: input.summary.clone(),
                key_points: input.key_points.clone(),
                objections: input.objections.clone(),
                next_steps: input.next_steps.clone(),
                sentiment: input.sentiment,
                coaching_notes: input.coaching_notes.clone(),
                created_at: now,
            })
            .await
    }

    /// List all call notes, newest first.
    pub async fn list(pool: &MemStore) -> Vec<CallNote> {
        Self::list_matching(pool, None, None).await
    }

    /// List the call notes linked to a deal, newest first.
    pub async fn list_by_deal(pool: &MemStore, deal_id: DbId) -> Vec<CallNote> {
        Self::list_matching(pool, Some(deal_id), None).await
    }

    /// List the call notes linked to a lead, newest first.
    pub async fn list_by_lead(pool: &MemStore, lead_id: DbId) -> Vec<CallNote> {
        Self::list_matching(pool, None, Some(lead_id)).await
    }

    /// List call notes matching every given link, newest first.
    pub async fn list_matching(
        pool: &MemStore,
        deal_id: Option<DbId>,
        lead_id: Option<DbId>,
    ) -> Vec<CallNote> {
        let mut rows = pool
            .call_notes
            .filter(|n| {
                deal_id.map_or(true, |id| n.deal_id == Some(id))
                    && lead_id.map_or(true, |id| n.lead_id == Some(id))
            })
            .await;
        sort_newest_first(&mut rows, |n| (n.created_at, n.id));
        rows
    }
}
