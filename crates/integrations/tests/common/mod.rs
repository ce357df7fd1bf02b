//! In-process fakes of the CRM, call-analytics and text-generation
//! sources.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use dealpulse_core::types::Timestamp;
use dealpulse_integrations::ai_engine::{CompletionRequest, TextGenerator};
use dealpulse_integrations::gong::{
    CallsPage, CallsQuery, GongCall, GongCallInsight, GongTranscript,
};
use dealpulse_integrations::hubspot::{
    ContactProperties, DealProperties, DealSearch, HubSpotContact, HubSpotDeal, Page,
};
use dealpulse_integrations::prompts;
use dealpulse_integrations::source::{CallSource, ConnectionStatus, CrmSource};
use dealpulse_integrations::{IntegrationError, IntegrationService};

pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()
}

pub fn deal(id: &str, name: &str, owner: &str, amount: &str) -> HubSpotDeal {
    HubSpotDeal {
        id: id.to_string(),
        properties: DealProperties {
            dealname: Some(name.to_string()),
            amount: Some(amount.to_string()),
            dealstage: Some("proposal".to_string()),
            hubspot_owner_id: Some(owner.to_string()),
            ..Default::default()
        },
        associations: None,
    }
}

pub fn contact(id: &str, email: &str) -> HubSpotContact {
    HubSpotContact {
        id: id.to_string(),
        properties: ContactProperties {
            email: Some(email.to_string()),
            ..Default::default()
        },
    }
}

/// A call hosted by `host` that started `days_ago` days before [`now`].
pub fn call(id: &str, host: &str, days_ago: i64) -> GongCall {
    let started = now() - Duration::days(days_ago);
    serde_json::from_value(serde_json::json!({
        "metaData": {
            "id": id,
            "started": started,
            "duration": 1800.0,
            "primaryUserId": host,
            "direction": "Outbound"
        },
        "parties": []
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// CRM
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCrm {
    pub deals: Vec<HubSpotDeal>,
    pub contacts: Vec<HubSpotContact>,
    pub searches: Mutex<Vec<DealSearch>>,
}

#[async_trait]
impl CrmSource for FakeCrm {
    async fn search_deals(&self, criteria: &DealSearch) -> Result<Vec<HubSpotDeal>, IntegrationError> {
        self.searches.lock().unwrap().push(criteria.clone());
        let matches = |deal: &HubSpotDeal| {
            criteria.filters.iter().all(|f| match f.property_name.as_str() {
                "hs_object_id" => deal.id == f.value,
                "hubspot_owner_id" => {
                    deal.properties.hubspot_owner_id.as_deref() == Some(f.value.as_str())
                }
                _ => false,
            })
        };
        Ok(self.deals.iter().filter(|&d| matches(d)).cloned().collect())
    }

    async fn get_contacts(
        &self,
        limit: u32,
        _after: Option<&str>,
    ) -> Result<Page<HubSpotContact>, IntegrationError> {
        Ok(Page {
            results: self.contacts.iter().take(limit as usize).cloned().collect(),
            paging: None,
        })
    }

    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::ok("HubSpot connection successful")
    }
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCalls {
    /// Every call, as listed by `get_calls`.
    pub calls: Vec<GongCall>,
    /// Calls linked to each CRM deal id.
    pub by_deal: HashMap<String, Vec<GongCall>>,
}

#[async_trait]
impl CallSource for FakeCalls {
    async fn get_calls(&self, _query: &CallsQuery) -> Result<CallsPage, IntegrationError> {
        Ok(CallsPage {
            calls: self.calls.clone(),
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

    async fn search_calls_by_crm(
        &self,
        crm_id: &str,
        _crm_system: &str,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        Ok(self.by_deal.get(crm_id).cloned().unwrap_or_default())
    }

    async fn get_team_calls(
        &self,
        user_ids: &[String],
        _from: Option<Timestamp>,
        _to: Option<Timestamp>,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        Ok(self
            .calls
            .iter()
            .filter(|c| {
                c.meta_data
                    .primary_user_id
                    .as_ref()
                    .is_some_and(|host| user_ids.contains(host))
            })
            .cloned()
            .collect())
    }

    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::failed("Gong connection failed: 401")
    }
}

// ---------------------------------------------------------------------------
// Text generation
// ---------------------------------------------------------------------------

pub const COPILOT_ANSWER: &str = "Two deals need attention this week.";

/// Replies according to the system prompt of each request.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn system_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages[0].content.clone())
            .collect()
    }
}

fn deal_analysis_reply() -> String {
    serde_json::json!({
        "dealId": "d-1",
        "riskScore": 35,
        "riskFactors": ["Single-threaded"],
        "nextBestActions": [
            { "action": "Loop in procurement", "priority": "high", "reasoning": "Late stage" }
        ],
        "healthIndicators": { "engagement": 70, "momentum": 55, "stakeholderAlignment": 60 },
        "predictedCloseDate": "2024-07-15",
        "closeProbability": 65
    })
    .to_string()
}

fn call_analysis_reply() -> String {
    serde_json::json!({
        "callId": "c-1",
        "sentiment": "positive",
        "keyInsights": ["Budget approved"],
        "objections": [],
        "nextSteps": ["Send MSA"],
        "coachingPoints": [],
        "talkRatio": { "prospect": 55, "rep": 45 }
    })
    .to_string()
}

fn team_insight_reply() -> String {
    serde_json::json!({
        "period": "30d",
        "teamMetrics": { "totalCalls": 3, "avgCallDuration": 30, "conversionRate": 20, "avgDealSize": 40000 },
        "topPerformers": [],
        "riskAlerts": [],
        "recommendations": []
    })
    .to_string()
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, IntegrationError> {
        self.requests.lock().unwrap().push(request.clone());
        let system = request.messages[0].content.as_str();
        let reply = match system {
            prompts::DEAL_ANALYST_SYSTEM => deal_analysis_reply(),
            prompts::CALL_COACH_SYSTEM => call_analysis_reply(),
            prompts::SALES_OPS_SYSTEM => team_insight_reply(),
            prompts::COPILOT_SYSTEM => COPILOT_ANSWER.to_string(),
            prompts::STRATEGIST_SYSTEM => "1. Email the champion\n\n2. Offer a pilot\n".to_string(),
            _ => return Ok(None),
        };
        Ok(Some(reply))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct Harness {
    pub service: IntegrationService,
    pub crm: Arc<FakeCrm>,
    pub generator: Arc<ScriptedGenerator>,
}

pub fn harness(crm: FakeCrm, calls: FakeCalls) -> Harness {
    let crm = Arc::new(crm);
    let generator = Arc::new(ScriptedGenerator::default());
    let service = IntegrationService::new(crm.clone(), Arc::new(calls), generator.clone());
    Harness {
        service,
        crm,
        generator,
    }
}
