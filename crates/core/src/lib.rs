//! Domain logic for the dealpulse sales dashboard.
//!
//! This crate has no I/O. Callers fetch leads and deals from the record
//! store and pass them in; every function here is a plain computation
//! over already-loaded data.

pub mod error;
pub mod insights;
pub mod pipeline;
pub mod record;
pub mod scoring;
pub mod staleness;
pub mod status;
pub mod types;
pub mod validation;
