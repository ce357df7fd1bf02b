//! Language-model backed analysis.
//!
//! [`TextGenerator`] is the seam to the hosted model; [`OpenAiClient`]
//! implements it over the chat-completions endpoint. [`AiEngine`] builds
//! the prompts, asks for JSON where the answer is structured, and
//! validates what comes back.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::{parse_model_json, CallAnalysis, DealAnalysis, TeamInsight};
use crate::error::IntegrationError;
use crate::gong::{GongCall, GongCallInsight, GongTranscript};
use crate::hubspot::{HubSpotContact, HubSpotDeal};
use crate::http::read_json;
use crate::prompts::{self, SalesContext};

const SERVICE: &str = "OpenAI";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature for analysis and Q&A.
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for follow-up suggestions.
const FOLLOW_UP_TEMPERATURE: f32 = 0.4;

const FALLBACK_ANSWER: &str = "I couldn't process that question.";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// One chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Ask the model for a single JSON object.
    pub json_output: bool,
}

impl CompletionRequest {
    fn new(system: &str, user: String, temperature: f32, json_output: bool) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature,
            json_output,
        }
    }
}

/// Opaque text generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply. `Ok(None)` means the model returned no content.
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, IntegrationError>;

    /// Model name, for logging.
    fn model_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// OpenAI chat completions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, IntegrationError> {
        let body = ChatCompletionsRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: request.json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let completion: ChatCompletionsResponse = read_json(SERVICE, response).await?;
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Prompted analyses over CRM and call data.
#[derive(Clone)]
pub struct AiEngine {
    generator: Arc<dyn TextGenerator>,
}

impl AiEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn generate_json(&self, request: CompletionRequest) -> Result<String, IntegrationError> {
        let content = self.generator.generate(&request).await?;
        Ok(content.unwrap_or_else(|| "{}".to_string()))
    }

    /// Risk, next actions and health for one deal.
    pub async fn analyze_deal(
        &self,
        deal: &HubSpotDeal,
        related_calls: &[GongCall],
        contacts: &[HubSpotContact],
    ) -> Result<DealAnalysis, IntegrationError> {
        let request = CompletionRequest::new(
            prompts::DEAL_ANALYST_SYSTEM,
            prompts::deal_analysis_prompt(deal, related_calls, contacts),
            ANALYSIS_TEMPERATURE,
            true,
        );
        let raw = self.generate_json(request).await?;
        let analysis: DealAnalysis = parse_model_json(&raw)?;
        analysis.validate()?;
        tracing::debug!(
            deal_id = %deal.id,
            model = self.generator.model_name(),
            risk_score = analysis.risk_score,
            "Deal analyzed",
        );
        Ok(analysis)
    }

    /// Coaching feedback for one call.
    pub async fn analyze_call(
        &self,
        call: &GongCall,
        transcript: &GongTranscript,
        insights: &GongCallInsight,
    ) -> Result<CallAnalysis, IntegrationError> {
        let request = CompletionRequest::new(
            prompts::CALL_COACH_SYSTEM,
            prompts::call_analysis_prompt(call, transcript, insights),
            ANALYSIS_TEMPERATURE,
            true,
        );
        let raw = self.generate_json(request).await?;
        parse_model_json(&raw)
    }

    /// Team-level metrics, alerts and recommendations.
    pub async fn generate_team_insights(
        &self,
        deals: &[HubSpotDeal],
        calls: &[GongCall],
        timeframe: &str,
    ) -> Result<TeamInsight, IntegrationError> {
        let request = CompletionRequest::new(
            prompts::SALES_OPS_SYSTEM,
            prompts::team_insight_prompt(deals, calls, timeframe),
            ANALYSIS_TEMPERATURE,
            true,
        );
        let raw = self.generate_json(request).await?;
        parse_model_json(&raw)
    }

    /// Free-text answer to a question about the user's data.
    pub async fn answer_sales_question(
        &self,
        question: &str,
        context: &SalesContext<'_>,
    ) -> Result<String, IntegrationError> {
        let request = CompletionRequest::new(
            prompts::COPILOT_SYSTEM,
            prompts::question_prompt(question, context),
            ANALYSIS_TEMPERATURE,
            false,
        );
        let answer = self.generator.generate(&request).await?;
        Ok(answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string()))
    }

    /// Follow-up suggestions for a quiet deal, one per non-empty line.
    pub async fn generate_follow_up_recommendations(
        &self,
        deal: &HubSpotDeal,
        recent_calls: &[GongCall],
        days_since_contact: Option<i64>,
    ) -> Result<Vec<String>, IntegrationError> {
        let request = CompletionRequest::new(
            prompts::STRATEGIST_SYSTEM,
            prompts::follow_up_prompt(deal, recent_calls.len(), days_since_contact),
            FOLLOW_UP_TEMPERATURE,
            false,
        );
        let reply = self.generator.generate(&request).await?.unwrap_or_default();
        Ok(split_lines(&reply))
    }
}

/// Non-empty trimmed lines of a model reply.
pub fn split_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
