//! External collaborators of the dashboard.
//!
//! - [`hubspot`] and [`gong`] are typed JSON clients for the CRM and the
//!   call-recording service.
//! - [`ai_engine`] wraps a hosted language model behind [`ai_engine::TextGenerator`].
//! - [`service`] combines the three per sales user.
//!
//! The service only sees the [`source`] traits, so it runs against
//! in-process fakes in tests.

pub mod ai_engine;
pub mod analysis;
pub mod config;
pub mod error;
pub mod gong;
pub mod hubspot;
mod http;
pub mod prompts;
pub mod service;
pub mod source;

pub use config::IntegrationConfig;
pub use error::IntegrationError;
pub use service::IntegrationService;
