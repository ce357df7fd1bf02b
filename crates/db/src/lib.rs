//! Record store for dealpulse.
//!
//! Leads, deals, activities and call notes live in process memory behind
//! [`MemStore`]. The repositories in [`repositories`] are the only code
//! that touches the tables directly.

use std::sync::Arc;

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub use store::{MemStore, StoreCounts};

/// Shared handle to the store, cloned into every request.
pub type DbPool = Arc<MemStore>;

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(MemStore::new())
}

/// Create a store pre-filled with the sample leads, deals and activities.
pub async fn create_seeded_pool() -> DbPool {
    let pool = create_pool();
    seed::seed_sample_data(&pool).await;
    pool
}
