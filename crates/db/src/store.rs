//! In-memory tables with owned id allocation.
//!
//! Each table keeps its rows and its id counter under one
//! [`tokio::sync::RwLock`], so allocating an id and inserting the row
//! happen atomically. Ids start at 1 and are never reused, even after a
//! delete.

use std::collections::BTreeMap;

use dealpulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::activity::Activity;
use crate::models::call_note::CallNote;
use crate::models::deal::Deal;
use crate::models::lead::Lead;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

struct TableInner<T> {
    next_id: DbId,
    rows: BTreeMap<DbId, T>,
}

/// A single keyed table.
pub struct Table<T> {
    inner: RwLock<TableInner<T>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(TableInner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Allocate the next id, build the row from it and store it.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(DbId) -> T,
    {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    pub async fn get(&self, id: DbId) -> Option<T> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    /// Every row, in id order.
    pub async fn all(&self) -> Vec<T> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    /// Rows matching `pred`, in id order.
    pub async fn filter<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|row| pred(row))
            .cloned()
            .collect()
    }

    /// Apply `patch` to the row in place. Returns the updated row, or
    /// `None` if no row has that id.
    pub async fn update_with<F>(&self, id: DbId, patch: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id)?;
        patch(row);
        Some(row.clone())
    }

    /// Remove a row. Returns `true` if it existed.
    pub async fn remove(&self, id: DbId) -> bool {
        self.inner.write().await.rows.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Sort rows newest first by `created_at`, ties broken by higher id first.
pub(crate) fn sort_newest_first<T, K>(rows: &mut [T], key: K)
where
    K: Fn(&T) -> (Timestamp, DbId),
{
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Every table of the dashboard.
pub struct MemStore {
    pub leads: Table<Lead>,
    pub deals: Table<Deal>,
    pub activities: Table<Activity>,
    pub call_notes: Table<CallNote>,
}

/// Row counts per table, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreCounts {
    pub leads: usize,
    pub deals: usize,
    pub activities: usize,
    pub call_notes: usize,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            leads: Table::new(),
            deals: Table::new(),
            activities: Table::new(),
            call_notes: Table::new(),
        }
    }

    pub async fn counts(&self) -> StoreCounts {
        StoreCounts {
            leads: self.leads.len().await,
            deals: self.deals.len().await,
            activities: self.activities.len().await,
            call_notes: self.call_notes.len().await,
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let table: Table<DbId> = Table::new();
        assert_eq!(table.insert_with(|id| id).await, 1);
        assert_eq!(table.insert_with(|id| id).await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let table: Table<DbId> = Table::new();
        table.insert_with(|id| id).await;
        let second = table.insert_with(|id| id).await;
        assert!(table.remove(second).await);
        assert_eq!(table.insert_with(|id| id).await, 3);
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let table: Table<DbId> = Table::new();
        assert_eq!(table.update_with(7, |v| *v += 1).await, None);
        assert!(!table.remove(7).await);
    }

    #[tokio::test]
    async fn empty_store_counts_are_zero() {
        let store = MemStore::new();
        assert_eq!(store.counts().await, StoreCounts::default());
        assert!(store.leads.is_empty().await);
    }
}
