pub mod activities;
pub mod analytics;
pub mod call_notes;
pub mod deals;
pub mod integrations;
pub mod leads;
