//! REST client for the Gong v2 call-analytics API.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dealpulse_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;
use crate::http::read_json;
use crate::source::{CallSource, ConnectionStatus};

const SERVICE: &str = "Gong";

pub const DEFAULT_BASE_URL: &str = "https://api.gong.io/v2";

/// Look-back window of [`CallsQuery`] when no start is given.
pub const DEFAULT_CALLS_WINDOW_DAYS: i64 = 30;

/// Look-back window of team call listings when no start is given.
pub const DEFAULT_TEAM_WINDOW_DAYS: i64 = 7;

pub const DEFAULT_CALLS_LIMIT: u32 = 100;

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetaData {
    pub id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub scheduled: Option<Timestamp>,
    pub started: Option<Timestamp>,
    pub ended: Option<Timestamp>,
    /// Seconds.
    pub duration: Option<f64>,
    pub primary_user_id: Option<String>,
    pub direction: Option<String>,
    pub system: Option<String>,
    pub scope: Option<String>,
    pub media: Option<String>,
    pub language: Option<String>,
    pub workspace_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContext {
    pub id: String,
    pub object_type: String,
    #[serde(default)]
    pub object_fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContext {
    pub scheduled_meeting: Option<ScheduledMeeting>,
    #[serde(default)]
    pub crm_context: Vec<CrmContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyContext {
    pub system: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParty {
    pub id: String,
    pub name: Option<String>,
    pub title: Option<String>,
    pub affiliation: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub speaker_id: Option<String>,
    #[serde(default)]
    pub context: Vec<PartyContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GongCall {
    pub meta_data: CallMetaData,
    #[serde(default)]
    pub context: Option<CallContext>,
    #[serde(default)]
    pub parties: Vec<CallParty>,
}

impl GongCall {
    pub fn id(&self) -> &str {
        &self.meta_data.id
    }

    pub fn started(&self) -> Option<Timestamp> {
        self.meta_data.started
    }

    /// Call length in whole minutes, when known.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.meta_data.duration.map(|secs| (secs / 60.0).round() as i64)
    }
}

// ---------------------------------------------------------------------------
// Transcript and insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    pub speaker_id: String,
    pub topic: Option<String>,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GongTranscript {
    pub call_id: String,
    pub transcript: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSegment {
    pub start: f64,
    pub end: f64,
    pub sentiment: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentInsight {
    pub overall: Option<String>,
    #[serde(default)]
    pub segments: Vec<SentimentSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicInsight {
    pub name: String,
    pub confidence: f64,
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordInsight {
    pub word: String,
    pub count: u32,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallInsights {
    pub sentiment: Option<SentimentInsight>,
    #[serde(default)]
    pub topics: Vec<TopicInsight>,
    #[serde(default)]
    pub keywords: Vec<KeywordInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GongCallInsight {
    pub call_id: String,
    pub insights: CallInsights,
}

impl GongCallInsight {
    pub fn empty(call_id: &str) -> Self {
        Self {
            call_id: call_id.to_string(),
            insights: CallInsights::default(),
        }
    }
}

/// Decode one section of the `/extensive` payload, or fall back to its
/// default when missing or malformed.
fn insight_section<T>(extensive: &serde_json::Value, key: &str, call_id: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match extensive.get(key) {
        None | Some(serde_json::Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(call_id, section = key, error = %e, "Malformed Gong insight section");
            T::default()
        }),
    }
}

/// Split the `/extensive` payload into typed insight sections.
pub fn parse_call_insights(call_id: &str, extensive: &serde_json::Value) -> GongCallInsight {
    GongCallInsight {
        call_id: call_id.to_string(),
        insights: CallInsights {
            sentiment: insight_section(extensive, "sentiment", call_id),
            topics: insight_section(extensive, "topics", call_id),
            keywords: insight_section(extensive, "keywords", call_id),
        },
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSelector {
    pub include_crm_context: bool,
    pub include_parties: bool,
    pub include_media: bool,
}

impl Default for ContentSelector {
    fn default() -> Self {
        Self {
            include_crm_context: true,
            include_parties: true,
            include_media: false,
        }
    }
}

/// Parameters for `POST /calls`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallsQuery {
    /// Defaults to [`DEFAULT_CALLS_WINDOW_DAYS`] before `to`.
    pub from: Option<Timestamp>,
    /// Defaults to now.
    pub to: Option<Timestamp>,
    pub cursor: Option<String>,
    /// Defaults to [`DEFAULT_CALLS_LIMIT`].
    pub limit: Option<u32>,
    pub content_selector: Option<ContentSelector>,
}

impl CallsQuery {
    /// JSON body for `POST /calls`, with defaults resolved against `now`.
    pub fn to_request_body(&self, now: Timestamp) -> serde_json::Value {
        let to = self.to.unwrap_or(now);
        let from = self
            .from
            .unwrap_or(to - Duration::days(DEFAULT_CALLS_WINDOW_DAYS));
        serde_json::json!({
            "filter": {
                "fromDateTime": from.to_rfc3339(),
                "toDateTime": to.to_rfc3339(),
            },
            "contentSelector": self.content_selector.unwrap_or_default(),
            "cursor": self.cursor,
            "limit": self.limit.unwrap_or(DEFAULT_CALLS_LIMIT),
        })
    }
}

/// Body for listing the calls of specific users.
pub fn team_calls_request_body(
    user_ids: &[String],
    from: Option<Timestamp>,
    to: Option<Timestamp>,
    now: Timestamp,
) -> serde_json::Value {
    let to = to.unwrap_or(now);
    let from = from.unwrap_or(to - Duration::days(DEFAULT_TEAM_WINDOW_DAYS));
    serde_json::json!({
        "filter": {
            "fromDateTime": from.to_rfc3339(),
            "toDateTime": to.to_rfc3339(),
            "users": user_ids,
        },
        "contentSelector": ContentSelector::default(),
    })
}

/// One page of calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallsPage {
    #[serde(default)]
    pub calls: Vec<GongCall>,
    #[serde(default)]
    pub records: serde_json::Value,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptResponse {
    #[serde(default)]
    call_transcript: Vec<TranscriptSegment>,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    records: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Bearer-token client for one Gong workspace.
pub struct GongClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GongClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{endpoint}", self.base_url))
            .bearer_auth(&self.access_token)
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{endpoint}", self.base_url))
            .bearer_auth(&self.access_token)
    }

    async fn post_calls(&self, body: &serde_json::Value) -> Result<CallsPage, IntegrationError> {
        let response = self.post("/calls").json(body).send().await?;
        read_json(SERVICE, response).await
    }

    /// List calls in a date window.
    pub async fn get_calls(&self, query: &CallsQuery) -> Result<CallsPage, IntegrationError> {
        self.post_calls(&query.to_request_body(Utc::now())).await
    }

    pub async fn get_call_transcript(&self, call_id: &str) -> Result<GongTranscript, IntegrationError> {
        let response = self
            .get(&format!("/calls/{call_id}/transcript"))
            .send()
            .await?;
        let body: TranscriptResponse = read_json(SERVICE, response).await?;
        Ok(GongTranscript {
            call_id: call_id.to_string(),
            transcript: body.call_transcript,
        })
    }

    /// Sentiment, topics and keywords for a call.
    ///
    /// A failed lookup is logged and yields empty sections.
    pub async fn get_call_insights(&self, call_id: &str) -> GongCallInsight {
        match self.get_extensive(call_id).await {
            Ok(value) => parse_call_insights(call_id, &value),
            Err(e) => {
                tracing::warn!(call_id, error = %e, "Failed to get Gong call insights");
                GongCallInsight::empty(call_id)
            }
        }
    }

    async fn get_extensive(&self, call_id: &str) -> Result<serde_json::Value, IntegrationError> {
        let response = self
            .get(&format!("/calls/{call_id}/extensive"))
            .send()
            .await?;
        read_json(SERVICE, response).await
    }

    /// Calls linked to a CRM object.
    pub async fn search_calls_by_crm(
        &self,
        crm_id: &str,
        crm_system: &str,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        let body = serde_json::json!({
            "filter": {
                "crmContext": { "id": crm_id, "system": crm_system },
            },
            "contentSelector": {
                "includeCrmContext": true,
                "includeParties": true,
            },
        });
        Ok(self.post_calls(&body).await?.calls)
    }

    /// Detailed activity stats for one user, as raw JSON records.
    pub async fn get_user_stats(
        &self,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<serde_json::Value>, IntegrationError> {
        let body = serde_json::json!({
            "filter": {
                "fromDateTime": from.to_rfc3339(),
                "toDateTime": to.to_rfc3339(),
                "users": [user_id],
            },
        });
        let response = self
            .post("/stats/activity/detailed")
            .json(&body)
            .send()
            .await?;
        let stats: StatsResponse = read_json(SERVICE, response).await?;
        Ok(stats.records)
    }

    pub async fn get_team_calls(
        &self,
        user_ids: &[String],
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        let body = team_calls_request_body(user_ids, from, to, Utc::now());
        Ok(self.post_calls(&body).await?.calls)
    }

    /// Probe the API with a one-call listing over the last day.
    pub async fn test_connection(&self) -> ConnectionStatus {
        let now = Utc::now();
        let query = CallsQuery {
            from: Some(now - Duration::days(1)),
            to: Some(now),
            limit: Some(1),
            ..Default::default()
        };
        match self.post_calls(&query.to_request_body(now)).await {
            Ok(_) => ConnectionStatus::ok("Gong connection successful"),
            Err(e) => {
                tracing::warn!(error = %e, "Gong connection test failed");
                ConnectionStatus::failed(format!("Gong connection failed: {e}"))
            }
        }
    }
}

#[async_trait]
impl CallSource for GongClient {
    async fn get_calls(&self, query: &CallsQuery) -> Result<CallsPage, IntegrationError> {
        GongClient::get_calls(self, query).await
    }

    async fn get_call_transcript(&self, call_id: &str) -> Result<GongTranscript, IntegrationError> {
        GongClient::get_call_transcript(self, call_id).await
    }

    async fn get_call_insights(&self, call_id: &str) -> GongCallInsight {
        GongClient::get_call_insights(self, call_id).await
    }

    async fn search_calls_by_crm(
        &self,
        crm_id: &str,
        crm_system: &str,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        GongClient::search_calls_by_crm(self, crm_id, crm_system).await
    }

    async fn get_team_calls(
        &self,
        user_ids: &[String],
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<GongCall>, IntegrationError> {
        GongClient::get_team_calls(self, user_ids, from, to).await
    }

    async fn test_connection(&self) -> ConnectionStatus {
        GongClient::test_connection(self).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
