//! Data-source traits the integration service depends on.
//!
//! [`HubSpotClient`](crate::hubspot::HubSpotClient) implements
//! [`CrmSource`] and [`GongClient`](crate::gong::GongClient) implements
//! [`CallSource`].

use async_trait::async_trait;
use dealpulse_core::types::Timestamp;
use serde::Serialize;

use crate::error::IntegrationError;
use crate::gong::{CallsPage, CallsQuery, GongCall, GongCallInsight, GongTranscript};
use crate::hubspot::{DealSearch, HubSpotContact, HubSpotDeal, Page};

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// CRM deals and contacts.
#[async_trait]
pub trait CrmSource: Send + Sync {
    async fn search_deals(&self, criteria: &DealSearch) -> Result<Vec<HubSpotDeal>, IntegrationError>;

    async fn get_contacts(
        &self,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Page<HubSpotContact>, IntegrationError>;

    async fn test_connection(&self) -> ConnectionStatus;
}

/// Recorded calls and their analytics.
#[async_trait]
pub trait CallSource: Send + Sync {
    async fn get_calls(&self, query: &CallsQuery) -> Result<CallsPage, IntegrationError>;

    async fn get_call_transcript(&self, call_id: &str) -> Result<GongTranscript, IntegrationError>;

    /// Best effort: failed lookups yield empty insight sections.
    async fn get_call_insights(&self, call_id: &str) -> GongCallInsight;

    /// Calls linked to a CRM object, e.g. a HubSpot deal.
    async fn search_calls_by_crm(
        &self,
        crm_id: &str,
        crm_system: &str,
    ) -> Result<Vec<GongCall>, IntegrationError>;

    /// Calls hosted by any of `user_ids` between `from` and `to`.
    async fn get_team_calls(
        &self,
        user_ids: &[String],
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<GongCall>, IntegrationError>;

    async fn test_connection(&self) -> ConnectionStatus;
}
