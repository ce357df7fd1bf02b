//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&MemStore` as the first argument. In-memory tables cannot
//! fail, so lookups return `Option` and writes return the stored row.

pub mod activity_repo;
pub mod call_note_repo;
pub mod deal_repo;
pub mod lead_repo;

pub use activity_repo::ActivityRepo;
pub use call_note_repo::CallNoteRepo;
pub use deal_repo::DealRepo;
pub use lead_repo::LeadRepo;
