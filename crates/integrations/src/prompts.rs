//! Prompt assembly for the language model.
//!
//! Every function here is pure: it renders CRM and call records into the
//! text the model sees.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::gong::{GongCall, GongCallInsight, GongTranscript};
use crate::hubspot::{HubSpotContact, HubSpotDeal};

pub const DEAL_ANALYST_SYSTEM: &str =
    "You are an expert sales analyst. Analyze the deal data and provide actionable insights in JSON format.";

pub const CALL_COACH_SYSTEM: &str =
    "You are an expert sales coach. Analyze the call and provide coaching insights in JSON format.";

pub const SALES_OPS_SYSTEM: &str =
    "You are a sales operations expert. Analyze team performance and provide strategic insights in JSON format.";

pub const COPILOT_SYSTEM: &str =
    "You are an AI sales assistant with access to CRM and call data. Provide accurate, actionable answers based on the data provided.";

pub const STRATEGIST_SYSTEM: &str =
    "You are a sales strategist. Provide specific, actionable follow-up recommendations.";

/// How many deals and calls the copilot context lists individually.
const CONTEXT_SAMPLE: usize = 5;

/// CRM and call data a question is answered against.
#[derive(Debug, Clone, Copy)]
pub struct SalesContext<'a> {
    pub deals: &'a [HubSpotDeal],
    pub calls: &'a [GongCall],
    pub contacts: &'a [HubSpotContact],
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("unknown")
}

fn call_line(call: &GongCall) -> String {
    let started = call
        .started()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());
    let minutes = call
        .duration_minutes()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("- {started}: {minutes}min")
}

fn deal_line(deal: &HubSpotDeal) -> String {
    format!(
        "- {}: ${} ({})",
        deal.name(),
        or_unknown(deal.properties.amount.as_deref()),
        or_unknown(deal.properties.dealstage.as_deref()),
    )
}

/// Deal counts per stage, alphabetical. Deals without a stage count as
/// `unknown`.
pub fn stage_distribution(deals: &[HubSpotDeal]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for deal in deals {
        let stage = or_unknown(deal.properties.dealstage.as_deref()).to_string();
        *counts.entry(stage).or_default() += 1;
    }
    counts.into_iter().collect()
}

pub fn deal_analysis_prompt(
    deal: &HubSpotDeal,
    calls: &[GongCall],
    contacts: &[HubSpotContact],
) -> String {
    let p = &deal.properties;
    let mut out = String::from("Analyze this deal and provide insights in JSON format:\n\nDeal Data:\n");
    let _ = writeln!(out, "- Name: {}", deal.name());
    let _ = writeln!(out, "- Amount: ${}", or_unknown(p.amount.as_deref()));
    let _ = writeln!(out, "- Stage: {}", or_unknown(p.dealstage.as_deref()));
    let _ = writeln!(out, "- Created: {}", or_unknown(p.createdate.as_deref()));
    let _ = writeln!(out, "- Last Modified: {}", or_unknown(p.hs_lastmodifieddate.as_deref()));
    let _ = writeln!(
        out,
        "- Probability: {}%",
        or_unknown(p.hs_deal_stage_probability.as_deref())
    );

    let _ = writeln!(out, "\nRelated Calls: {} calls", calls.len());
    for call in calls {
        let _ = writeln!(out, "{}", call_line(call));
    }
    let _ = writeln!(out, "\nContacts: {} contacts", contacts.len());

    let _ = write!(
        out,
        r#"
Provide analysis with:
{{
  "dealId": "{}",
  "riskScore": <0-100>,
  "riskFactors": ["factor1", "factor2"],
  "nextBestActions": [{{"action": "...", "priority": "high/medium/low", "reasoning": "..."}}],
  "healthIndicators": {{"engagement": <0-100>, "momentum": <0-100>, "stakeholderAlignment": <0-100>}},
  "predictedCloseDate": "YYYY-MM-DD",
  "closeProbability": <0-100>
}}
"#,
        deal.id
    );
    out
}

pub fn call_analysis_prompt(
    call: &GongCall,
    transcript: &GongTranscript,
    insights: &GongCallInsight,
) -> String {
    let minutes = call
        .duration_minutes()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let mut out = String::from(
        "Analyze this sales call and provide coaching insights in JSON format:\n\nCall Data:\n",
    );
    let _ = writeln!(out, "- Duration: {minutes} minutes");
    let _ = writeln!(out, "- Participants: {}", call.parties.len());
    let _ = writeln!(
        out,
        "- Direction: {}",
        or_unknown(call.meta_data.direction.as_deref())
    );
    let _ = writeln!(
        out,
        "\nTranscript Summary: {} segments",
        transcript.transcript.len()
    );

    if let Some(overall) = insights
        .insights
        .sentiment
        .as_ref()
        .and_then(|s| s.overall.as_deref())
    {
        let _ = writeln!(out, "Recorded Sentiment: {overall}");
    }
    if !insights.insights.topics.is_empty() {
        let topics: Vec<&str> = insights.insights.topics.iter().map(|t| t.name.as_str()).collect();
        let _ = writeln!(out, "Topics: {}", topics.join(", "));
    }

    let _ = write!(
        out,
        r#"
Provide analysis with:
{{
  "callId": "{}",
  "sentiment": "positive/neutral/negative",
  "keyInsights": ["insight1", "insight2"],
  "objections": [{{"objection": "...", "response": "...", "resolved": true/false}}],
  "nextSteps": ["step1", "step2"],
  "coachingPoints": [{{"area": "...", "feedback": "...", "improvement": "..."}}],
  "talkRatio": {{"prospect": <percentage>, "rep": <percentage>}}
}}
"#,
        call.id()
    );
    out
}

pub fn team_insight_prompt(deals: &[HubSpotDeal], calls: &[GongCall], timeframe: &str) -> String {
    let mut out = format!(
        "Analyze team performance for the last {timeframe} and provide strategic insights:\n\n"
    );
    let _ = writeln!(out, "Deals: {} total", deals.len());
    let _ = writeln!(out, "Calls: {} total", calls.len());
    let _ = writeln!(out, "\nDeal Stages Distribution:");
    for (stage, count) in stage_distribution(deals) {
        let _ = writeln!(out, "{stage}: {count}");
    }

    let _ = write!(
        out,
        r#"
Provide insights with:
{{
  "period": "{timeframe}",
  "teamMetrics": {{"totalCalls": {}, "avgCallDuration": <minutes>, "conversionRate": <percentage>, "avgDealSize": <amount>}},
  "topPerformers": [{{"userId": "...", "name": "...", "metric": "...", "value": <number>}}],
  "riskAlerts": [{{"type": "deal_stagnant/low_activity/negative_sentiment", "description": "...", "dealId": "...", "userId": "..."}}],
  "recommendations": [{{"category": "...", "suggestion": "...", "impact": "high/medium/low"}}]
}}
"#,
        calls.len()
    );
    out
}

/// Summary of the user's data that prefixes a copilot question.
pub fn contextual_prompt(context: &SalesContext<'_>) -> String {
    let mut out = String::from("Available Data:\n");
    let _ = writeln!(out, "- {} deals in pipeline", context.deals.len());
    let _ = writeln!(out, "- {} recent calls", context.calls.len());
    let _ = writeln!(out, "- {} contacts", context.contacts.len());

    let _ = writeln!(out, "\nDeal Summary:");
    for deal in context.deals.iter().take(CONTEXT_SAMPLE) {
        let _ = writeln!(out, "{}", deal_line(deal));
    }

    let _ = writeln!(out, "\nRecent Call Activity:");
    for call in context.calls.iter().take(CONTEXT_SAMPLE) {
        let _ = writeln!(out, "{}", call_line(call));
    }
    out
}

pub fn question_prompt(question: &str, context: &SalesContext<'_>) -> String {
    format!("Context:\n{}\n\nQuestion: {question}", contextual_prompt(context))
}

/// `days_since_contact` of `None` means the deal was never contacted.
pub fn follow_up_prompt(
    deal: &HubSpotDeal,
    recent_calls: usize,
    days_since_contact: Option<i64>,
) -> String {
    let days = days_since_contact
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never contacted".to_string());
    format!(
        "Deal: {} - ${} - Stage: {}\nDays since last contact: {days}\nRecent calls: {recent_calls}\n\nGenerate 3-5 specific follow-up recommendations for this deal.\n",
        deal.name(),
        or_unknown(deal.properties.amount.as_deref()),
        or_unknown(deal.properties.dealstage.as_deref()),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hubspot::DealProperties;

    fn deal(id: &str, name: &str, stage: Option<&str>) -> HubSpotDeal {
        HubSpotDeal {
            id: id.to_string(),
            properties: DealProperties {
                dealname: Some(name.to_string()),
                amount: Some("45000".to_string()),
                dealstage: stage.map(str::to_string),
                ..Default::default()
            },
            associations: None,
        }
    }

    #[test]
    fn stage_distribution_counts_and_sorts() {
        let deals = vec![
            deal("1", "a", Some("proposal")),
            deal("2", "b", Some("closing")),
            deal("3", "c", Some("proposal")),
            deal("4", "d", None),
        ];
        assert_eq!(
            stage_distribution(&deals),
            vec![
                ("closing".to_string(), 1),
                ("proposal".to_string(), 2),
                ("unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn deal_prompt_embeds_id_and_counts() {
        let prompt = deal_analysis_prompt(&deal("101", "Acme", Some("proposal")), &[], &[]);
        assert!(prompt.contains("- Name: Acme"));
        assert!(prompt.contains("- Amount: $45000"));
        assert!(prompt.contains("\"dealId\": \"101\""));
        assert!(prompt.contains("Related Calls: 0 calls"));
        assert!(prompt.contains("- Probability: unknown%"));
    }

    #[test]
    fn team_prompt_lists_stages() {
        let deals = vec![deal("1", "a", Some("proposal"))];
        let prompt = team_insight_prompt(&deals, &[], "30d");
        assert!(prompt.contains("last 30d"));
        assert!(prompt.contains("proposal: 1"));
        assert!(prompt.contains("\"totalCalls\": 0"));
    }

    #[test]
    fn context_lists_at_most_five_deals() {
        let deals: Vec<HubSpotDeal> = (0..8)
            .map(|i| deal(&i.to_string(), &format!("Deal {i}"), Some("proposal")))
            .collect();
        let context = SalesContext {
            deals: &deals,
            calls: &[],
            contacts: &[],
        };
        let prompt = contextual_prompt(&context);
        assert!(prompt.contains("- 8 deals in pipeline"));
        assert!(prompt.contains("Deal 4"));
        assert!(!prompt.contains("Deal 5"));
    }

    #[test]
    fn question_prompt_appends_question() {
        let context = SalesContext {
            deals: &[],
            calls: &[],
            contacts: &[],
        };
        let prompt = question_prompt("Which deals are at risk?", &context);
        assert!(prompt.starts_with("Context:\nAvailable Data:"));
        assert!(prompt.ends_with("Question: Which deals are at risk?"));
    }

    #[test]
    fn follow_up_prompt_handles_never_contacted() {
        let d = deal("1", "GlobalCo", Some("proposal"));
        assert!(follow_up_prompt(&d, 0, None).contains("Days since last contact: never contacted"));
        assert!(follow_up_prompt(&d, 2, Some(9)).contains("Days since last contact: 9"));
    }
}
