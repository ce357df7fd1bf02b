//! Structured results requested from the language model.
//!
//! The model is asked for camelCase JSON, so these types read camelCase
//! and write the API's snake_case. Parsed values are range-checked before
//! they leave the engine.

use dealpulse_core::status::{Priority, Sentiment};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;

// ---------------------------------------------------------------------------
// Deal analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextBestAction {
    pub action: String,
    pub priority: Priority,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct HealthIndicators {
    pub engagement: f64,
    pub momentum: f64,
    pub stakeholder_alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct DealAnalysis {
    pub deal_id: String,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub next_best_actions: Vec<NextBestAction>,
    pub health_indicators: HealthIndicators,
    /// `YYYY-MM-DD`, when the model commits to one.
    #[serde(default)]
    pub predicted_close_date: Option<String>,
    pub close_probability: f64,
}

impl DealAnalysis {
    pub fn validate(&self) -> Result<(), IntegrationError> {
        check_percentage(self.risk_score, "riskScore")?;
        check_percentage(self.close_probability, "closeProbability")?;
        check_percentage(self.health_indicators.engagement, "healthIndicators.engagement")?;
        check_percentage(self.health_indicators.momentum, "healthIndicators.momentum")?;
        check_percentage(
            self.health_indicators.stakeholder_alignment,
            "healthIndicators.stakeholderAlignment",
        )
    }
}

// ---------------------------------------------------------------------------
// Call analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallObjection {
    pub objection: String,
    pub response: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingPoint {
    pub area: String,
    pub feedback: String,
    pub improvement: String,
}

/// Share of talk time, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRatio {
    pub prospect: f64,
    pub rep: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CallAnalysis {
    pub call_id: String,
    pub sentiment: Sentiment,
    pub key_insights: Vec<String>,
    pub objections: Vec<CallObjection>,
    pub next_steps: Vec<String>,
    pub coaching_points: Vec<CoachingPoint>,
    pub talk_ratio: TalkRatio,
}

// ---------------------------------------------------------------------------
// Team insight
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TeamMetrics {
    pub total_calls: f64,
    pub avg_call_duration: f64,
    pub conversion_rate: f64,
    pub avg_deal_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TopPerformer {
    pub user_id: String,
    pub name: String,
    pub metric: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAlertKind {
    DealStagnant,
    LowActivity,
    NegativeSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct RiskAlert {
    #[serde(rename = "type")]
    pub kind: RiskAlertKind,
    pub description: String,
    #[serde(default)]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
    pub impact: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TeamInsight {
    pub period: String,
    pub team_metrics: TeamMetrics,
    pub top_performers: Vec<TopPerformer>,
    pub risk_alerts: Vec<RiskAlert>,
    pub recommendations: Vec<Recommendation>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Reject values outside `[0, 100]`, including NaN.
pub fn check_percentage(value: f64, field: &str) -> Result<(), IntegrationError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(IntegrationError::Schema(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

/// Decode model output as JSON into `T`.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, IntegrationError> {
    serde_json::from_str(raw).map_err(|e| IntegrationError::Schema(format!("model output: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
