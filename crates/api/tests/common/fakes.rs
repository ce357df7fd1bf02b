//! Canned CRM, call and model sources for the integration routes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dealpulse_core::types::Timestamp;
use dealpulse_integrations::ai_engine::{CompletionRequest, TextGenerator};
use dealpulse_integrations::gong::{
    CallsPage, CallsQuery, GongCall, GongCallInsight, GongTranscript,
};
use dealpulse_integrations::hubspot::{DealProperties, DealSearch, HubSpotContact, HubSpotDeal, Page};
use dealpulse_integrations::prompts;
use dealpulse_integrations::source::{CallSource, ConnectionStatus, CrmSource};
use dealpulse_integrations::{IntegrationError, IntegrationService};

fn deal(id: &str, owner: &str, amount: &str) -> HubSpotDeal {
    HubSpotDeal {
        id: id.to_string(),
        properties: DealProperties {
            dealname: Some(format!("Deal {id}")),
            amount: Some(amount.to_string()),
            dealstage: Some("proposal".to_string()),
            hubspot_owner_id: Some(owner.to_string()),
            ..Default::default()
        },
        associations: None,
    }
}

fn call(id: &str, days_ago: i64) -> GongCall {
    serde_json::from_value(serde_json::json!({
        "metaData": {
            "id": id,
            "started": Utc::now() - Duration::days(days_ago),
            "duration": 900.0,
            "primaryUserId": "gong-user-001"
        }
    }))
    .unwrap()
}

struct Crm;

#[async_trait]
impl CrmSource for Crm {
    async fn search_deals(&self, criteria: &DealSearch) -> Result<Vec<HubSpotDeal>, IntegrationError> {
        let deals = vec![deal("101", "hs-owner-001", "45000"), deal("102", "hs-owner-001", "15000")];
        let filter = &criteria.filters[0];
        Ok(deals
            .into_iter()
            .filter(|d| match filter.property_name.as_str() {
                "hs_object_id" => d.id == filter.value,
                _ => d.properties.hubspot_owner_id.as_deref() == Some(filter.value.as_str()),
            })
            .collect())
    }

    async fn get_contacts(&self, _limit: u32, _after: Option<&str>) -> Result<Page<HubSpotContact>, IntegrationError> {
        Ok(Page {
            results: Vec::new(),
            paging: None,
        })
    }

    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::ok("HubSpot connection successful")
    }
}

struct Calls;

#[async_trait]
impl CallSource for Calls {
    async fn get_calls(&self, _query: &CallsQuery) -> Result<CallsPage, IntegrationError> {
        Ok(CallsPage {
            calls: vec![call("c-1", 1)],
            ..Default::default()
        })
    }

    async fn get_call_transcript(&self, call_id: &str) -> Result<GongTranscript, IntegrationError> {
        Ok(GongTranscript {
            call_id: call_id.to_string(),
            transcript: Vec::new(),
        })
    }

    async fn get_call_insights(&self, call_id: &str) -> GongCallInsight {
        GongCallInsight::empty(call_id)
    }

    /// Deal 101 was called yesterday; deal 102 never.
    async fn search_calls_by_crm(&self, crm_id: &str, _crm_system: &str) -> Result<Vec<GongCall>, IntegrationError> {
        Ok(if crm_id == "101" { vec![call("c-1", 1)] } else { Vec::new() })
    }

    async fn get_team_calls(
        &self,
        _user_ids: &[String],
        _from: Option<Timestamp>,
        _to: Option<Timestamp>,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        Ok(vec![call("c-1", 1)])
    }

    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::ok("Gong connection successful")
    }
}

struct Model;

#[async_trait]
impl TextGenerator for Model {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, IntegrationError> {
        let reply = match request.messages[0].content.as_str() {
            prompts::DEAL_ANALYST_SYSTEM => serde_json::json!({
                "dealId": "101",
                "riskScore": 20,
                "riskFactors": [],
                "nextBestActions": [],
                "healthIndicators": { "engagement": 80, "momentum": 70, "stakeholderAlignment": 75 },
                "closeProbability": 70
            })
            .to_string(),
            prompts::CALL_COACH_SYSTEM => serde_json::json!({
                "callId": "c-1",
                "sentiment": "neutral",
                "keyInsights": [],
                "objections": [],
                "nextSteps": [],
                "coachingPoints": [],
                "talkRatio": { "prospect": 50, "rep": 50 }
            })
            .to_string(),
            prompts::SALES_OPS_SYSTEM => serde_json::json!({
                "period": "30d",
                "teamMetrics": { "totalCalls": 1, "avgCallDuration": 15, "conversionRate": 10, "avgDealSize": 30000 },
                "topPerformers": [],
                "riskAlerts": [],
                "recommendations": []
            })
            .to_string(),
            prompts::COPILOT_SYSTEM => "Focus on Deal 101.".to_string(),
            _ => "Send a recap email".to_string(),
        };
        Ok(Some(reply))
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

/// Integration service over the canned sources.
pub fn service() -> IntegrationService {
    IntegrationService::new(Arc::new(Crm), Arc::new(Calls), Arc::new(Model))
}
