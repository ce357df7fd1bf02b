//! Per-user view over the CRM, call analytics and the language model.
//!
//! [`IntegrationService`] owns a small directory of sales users and teams.
//! Each user maps to a HubSpot owner and a Gong user; every operation
//! resolves the user first and then fans out to the sources.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use dealpulse_core::staleness::rank_silent;
use dealpulse_core::types::Timestamp;
use futures::future::try_join_all;
use serde::Serialize;

use crate::ai_engine::{AiEngine, OpenAiClient, TextGenerator};
use crate::analysis::{CallAnalysis, DealAnalysis, TeamInsight};
use crate::config::IntegrationConfig;
use crate::error::IntegrationError;
use crate::gong::{CallsQuery, GongCall, GongCallInsight, GongClient, GongTranscript};
use crate::hubspot::{DealSearch, HubSpotClient, HubSpotContact, HubSpotDeal};
use crate::prompts::SalesContext;
use crate::source::{CallSource, ConnectionStatus, CrmSource};

/// Contacts fetched per user.
const CONTACTS_LIMIT: u32 = 50;

/// Default look-back for a user's calls.
pub const DEFAULT_CALL_DAYS: i64 = 30;

/// Longest look-back accepted for a user's calls.
pub const MAX_CALL_DAYS: i64 = 365;

/// Deals shown on the dashboard.
const DASHBOARD_DEALS: usize = 10;

/// Calls shown on the dashboard.
const DASHBOARD_CALLS: usize = 5;

const INSIGHT_PERIOD: &str = "30d";

/// CRM system name used when looking up calls linked to a deal.
const CRM_SYSTEM: &str = "hubspot";

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

dealpulse_core::define_label_enum! {
    /// Directory role of a sales user.
    UserRole {
        Admin = "admin",
        Manager = "manager",
        Ae = "ae",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub hubspot_owner_id: Option<String>,
    pub gong_user_id: Option<String>,
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// User ids of the reps on the team.
    pub members: Vec<String>,
    /// User id of the team's manager.
    pub manager: String,
}

fn sample_user(id: &str, email: &str, name: &str, role: UserRole, n: u32) -> SalesUser {
    SalesUser {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        hubspot_owner_id: Some(format!("hs-owner-{n:03}")),
        gong_user_id: Some(format!("gong-user-{n:03}")),
        team_id: Some("team-enterprise".to_string()),
    }
}

/// The enterprise sales team the dashboard ships with.
pub fn sample_directory() -> (Vec<SalesUser>, Vec<Team>) {
    let users = vec![
        sample_user("ae-001", "john.doe@snackmagic.com", "John Doe", UserRole::Ae, 1),
        sample_user("ae-002", "sarah.smith@snackmagic.com", "Sarah Smith", UserRole::Ae, 2),
        sample_user("mgr-001", "mike.manager@snackmagic.com", "Mike Manager", UserRole::Manager, 3),
    ];
    let teams = vec![Team {
        id: "team-enterprise".to_string(),
        name: "Enterprise Sales Team".to_string(),
        members: vec!["ae-001".to_string(), "ae-002".to_string()],
        manager: "mgr-001".to_string(),
    }];
    (users, teams)
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_deals: usize,
    pub total_calls: usize,
    pub pipeline_value: f64,
    pub avg_deal_size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDashboard {
    pub user: SalesUser,
    pub metrics: DashboardMetrics,
    pub deals: Vec<HubSpotDeal>,
    pub recent_calls: Vec<GongCall>,
    pub insights: TeamInsight,
}

#[derive(Debug, Clone, Serialize)]
pub struct DealAnalysisReport {
    pub deal: HubSpotDeal,
    pub related_calls: Vec<GongCall>,
    pub analysis: DealAnalysis,
    pub last_analyzed: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallAnalysisReport {
    pub call: GongCall,
    pub transcript: GongTranscript,
    pub insights: GongCallInsight,
    pub analysis: CallAnalysis,
    pub last_analyzed: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopilotContext {
    pub deals_count: usize,
    pub calls_count: usize,
    pub contacts_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopilotAnswer {
    pub question: String,
    pub answer: String,
    pub context: CopilotContext,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberMetrics {
    pub deals_count: usize,
    pub calls_count: usize,
    pub pipeline_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberPerformance {
    pub user: Option<SalesUser>,
    pub deals: Vec<HubSpotDeal>,
    pub calls: Vec<GongCall>,
    pub metrics: MemberMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub total_deals: usize,
    pub total_calls: usize,
    pub total_pipeline_value: f64,
    pub avg_deals_per_rep: f64,
    pub avg_calls_per_rep: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamPerformance {
    pub team: Team,
    pub team_data: Vec<MemberPerformance>,
    pub team_insights: TeamInsight,
    pub aggregate_metrics: AggregateMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    None,
    Call,
}

/// A CRM deal nobody has called recently.
#[derive(Debug, Clone, Serialize)]
pub struct SilentCrmDeal {
    pub deal: HubSpotDeal,
    /// `None` when the deal has no dated call at all.
    pub days_since_last_contact: Option<i64>,
    pub last_contact_type: ContactType,
    pub last_contact_date: Option<Timestamp>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub hubspot: ConnectionStatus,
    pub gong: ConnectionStatus,
    pub ai: ConnectionStatus,
    pub timestamp: Timestamp,
}

fn total_amount(deals: &[HubSpotDeal]) -> f64 {
    deals.iter().map(HubSpotDeal::amount).sum()
}

fn per_head(total: usize, heads: usize) -> f64 {
    if heads == 0 {
        0.0
    } else {
        total as f64 / heads as f64
    }
}

fn user_not_found(user_id: &str) -> IntegrationError {
    IntegrationError::NotFound {
        entity: "User",
        id: user_id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct IntegrationService {
    crm: Arc<dyn CrmSource>,
    calls: Arc<dyn CallSource>,
    ai: AiEngine,
    users: BTreeMap<String, SalesUser>,
    teams: BTreeMap<String, Team>,
}

impl IntegrationService {
    /// Service over the given sources, with the sample directory loaded.
    pub fn new(
        crm: Arc<dyn CrmSource>,
        calls: Arc<dyn CallSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let (users, teams) = sample_directory();
        Self {
            crm,
            calls,
            ai: AiEngine::new(generator),
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            teams: teams.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// Build the live clients. `None` unless every credential is set.
    pub fn from_config(config: &IntegrationConfig) -> Option<Self> {
        let hubspot_token = config.hubspot_access_token.clone()?;
        let gong_token = config.gong_access_token.clone()?;
        let openai_key = config.openai_api_key.clone()?;

        let hubspot = match &config.hubspot_base_url {
            Some(url) => HubSpotClient::with_base_url(hubspot_token, url.clone()),
            None => HubSpotClient::new(hubspot_token),
        };
        let gong = match &config.gong_base_url {
            Some(url) => GongClient::with_base_url(gong_token, url.clone()),
            None => GongClient::new(gong_token),
        };
        let openai = match &config.openai_base_url {
            Some(url) => OpenAiClient::with_base_url(openai_key, config.openai_model.clone(), url.clone()),
            None => OpenAiClient::new(openai_key, config.openai_model.clone()),
        };

        tracing::info!(model = %config.openai_model, "Integration service configured");
        Some(Self::new(Arc::new(hubspot), Arc::new(gong), Arc::new(openai)))
    }

    fn require_user(&self, user_id: &str) -> Result<&SalesUser, IntegrationError> {
        self.users.get(user_id).ok_or_else(|| user_not_found(user_id))
    }

    // -- directory -----------------------------------------------------------

    pub fn get_user(&self, user_id: &str) -> Option<&SalesUser> {
        self.users.get(user_id)
    }

    /// Members of a team, in roster order. Unknown teams have none.
    pub fn team_members(&self, team_id: &str) -> Vec<&SalesUser> {
        self.teams
            .get(team_id)
            .map(|team| {
                team.members
                    .iter()
                    .filter_map(|id| self.users.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn users_by_role(&self, role: UserRole) -> Vec<&SalesUser> {
        self.users.values().filter(|u| u.role == role).collect()
    }

    // -- per-user data -------------------------------------------------------

    /// Deals owned by the user's HubSpot owner, most recently modified
    /// first. Users without an owner mapping have no deals.
    pub async fn user_deals(&self, user_id: &str) -> Result<Vec<HubSpotDeal>, IntegrationError> {
        let Some(owner_id) = self
            .users
            .get(user_id)
            .and_then(|u| u.hubspot_owner_id.as_deref())
        else {
            return Ok(Vec::new());
        };
        self.crm.search_deals(&DealSearch::owned_by(owner_id)).await
    }

    /// Calls hosted by the user over the last `days` days, clamped to
    /// `1..=MAX_CALL_DAYS`.
    pub async fn user_calls(&self, user_id: &str, days: i64) -> Result<Vec<GongCall>, IntegrationError> {
        let Some(gong_id) = self
            .users
            .get(user_id)
            .and_then(|u| u.gong_user_id.clone())
        else {
            return Ok(Vec::new());
        };
        let to = Utc::now();
        let from = to - Duration::days(days.clamp(1, MAX_CALL_DAYS));
        self.calls.get_team_calls(&[gong_id], Some(from), Some(to)).await
    }

    /// First page of CRM contacts for users with an owner mapping.
    pub async fn user_contacts(&self, user_id: &str) -> Result<Vec<HubSpotContact>, IntegrationError> {
        let mapped = self
            .users
            .get(user_id)
            .is_some_and(|u| u.hubspot_owner_id.is_some());
        if !mapped {
            return Ok(Vec::new());
        }
        let page = self.crm.get_contacts(CONTACTS_LIMIT, None).await?;
        Ok(page.results)
    }

    async fn user_data(
        &self,
        user_id: &str,
    ) -> Result<(Vec<HubSpotDeal>, Vec<GongCall>, Vec<HubSpotContact>), IntegrationError> {
        futures::try_join!(
            self.user_deals(user_id),
            self.user_calls(user_id, DEFAULT_CALL_DAYS),
            self.user_contacts(user_id),
        )
    }

    pub async fn user_dashboard(&self, user_id: &str) -> Result<UserDashboard, IntegrationError> {
        let user = self.require_user(user_id)?.clone();
        let (mut deals, mut calls, _contacts) = self.user_data(user_id).await?;

        let insights = self
            .ai
            .generate_team_insights(&deals, &calls, INSIGHT_PERIOD)
            .await?;

        let pipeline_value = total_amount(&deals);
        let metrics = DashboardMetrics {
            total_deals: deals.len(),
            total_calls: calls.len(),
            pipeline_value,
            avg_deal_size: if deals.is_empty() {
                0.0
            } else {
                pipeline_value / deals.len() as f64
            },
        };

        deals.truncate(DASHBOARD_DEALS);
        calls.truncate(DASHBOARD_CALLS);
        tracing::info!(user_id, total_deals = metrics.total_deals, "Dashboard built");

        Ok(UserDashboard {
            user,
            metrics,
            deals,
            recent_calls: calls,
            insights,
        })
    }

    // -- analysis ------------------------------------------------------------

    pub async fn analyze_deal(
        &self,
        deal_id: &str,
        user_id: &str,
    ) -> Result<DealAnalysisReport, IntegrationError> {
        self.require_user(user_id)?;

        let deal = self
            .crm
            .search_deals(&DealSearch::by_id(deal_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| IntegrationError::NotFound {
                entity: "Deal",
                id: deal_id.to_string(),
            })?;

        let (related_calls, contacts) = futures::try_join!(
            self.calls.search_calls_by_crm(deal_id, CRM_SYSTEM),
            self.user_contacts(user_id),
        )?;

        let analysis = self.ai.analyze_deal(&deal, &related_calls, &contacts).await?;
        tracing::info!(deal_id, user_id, risk_score = analysis.risk_score, "Deal analysis complete");

        Ok(DealAnalysisReport {
            deal,
            related_calls,
            analysis,
            last_analyzed: Utc::now(),
        })
    }

    /// Look the call up among recent calls, then analyse its transcript.
    pub async fn analyze_call(&self, call_id: &str) -> Result<CallAnalysisReport, IntegrationError> {
        let page = self.calls.get_calls(&CallsQuery::default()).await?;
        let call = page
            .calls
            .into_iter()
            .find(|c| c.id() == call_id)
            .ok_or_else(|| IntegrationError::NotFound {
                entity: "Call",
                id: call_id.to_string(),
            })?;

        let (transcript, insights) = futures::join!(
            self.calls.get_call_transcript(call_id),
            self.calls.get_call_insights(call_id),
        );
        let transcript = transcript?;

        let analysis = self.ai.analyze_call(&call, &transcript, &insights).await?;
        tracing::info!(call_id, sentiment = %analysis.sentiment, "Call analysis complete");

        Ok(CallAnalysisReport {
            call,
            transcript,
            insights,
            analysis,
            last_analyzed: Utc::now(),
        })
    }

    /// Answer a free-text question against the user's deals, calls and
    /// contacts.
    pub async fn ask_copilot(&self, question: &str, user_id: &str) -> Result<CopilotAnswer, IntegrationError> {
        self.require_user(user_id)?;
        let (deals, calls, contacts) = self.user_data(user_id).await?;

        let context = SalesContext {
            deals: &deals,
            calls: &calls,
            contacts: &contacts,
        };
        let answer = self.ai.answer_sales_question(question, &context).await?;

        Ok(CopilotAnswer {
            question: question.to_string(),
            answer,
            context: CopilotContext {
                deals_count: deals.len(),
                calls_count: calls.len(),
                contacts_count: contacts.len(),
            },
            timestamp: Utc::now(),
        })
    }

    // -- team ----------------------------------------------------------------

    async fn member_performance(&self, member_id: &str) -> Result<MemberPerformance, IntegrationError> {
        let (deals, calls) = futures::try_join!(
            self.user_deals(member_id),
            self.user_calls(member_id, DEFAULT_CALL_DAYS),
        )?;
        let metrics = MemberMetrics {
            deals_count: deals.len(),
            calls_count: calls.len(),
            pipeline_value: total_amount(&deals),
        };
        Ok(MemberPerformance {
            user: self.users.get(member_id).cloned(),
            deals,
            calls,
            metrics,
        })
    }

    /// Per-rep data and team insights for the team a manager runs.
    pub async fn team_performance(&self, manager_id: &str) -> Result<TeamPerformance, IntegrationError> {
        let is_manager = self
            .users
            .get(manager_id)
            .is_some_and(|u| u.role == UserRole::Manager);
        if !is_manager {
            return Err(IntegrationError::Forbidden(
                "Manager role required".to_string(),
            ));
        }

        let team = self
            .teams
            .values()
            .find(|t| t.manager == manager_id)
            .cloned()
            .ok_or_else(|| IntegrationError::NotFound {
                entity: "Team",
                id: manager_id.to_string(),
            })?;

        let team_data = try_join_all(team.members.iter().map(|id| self.member_performance(id))).await?;

        let all_deals: Vec<HubSpotDeal> = team_data.iter().flat_map(|m| m.deals.clone()).collect();
        let all_calls: Vec<GongCall> = team_data.iter().flat_map(|m| m.calls.clone()).collect();

        let team_insights = self
            .ai
            .generate_team_insights(&all_deals, &all_calls, INSIGHT_PERIOD)
            .await?;

        let heads = team.members.len();
        let aggregate_metrics = AggregateMetrics {
            total_deals: all_deals.len(),
            total_calls: all_calls.len(),
            total_pipeline_value: team_data.iter().map(|m| m.metrics.pipeline_value).sum(),
            avg_deals_per_rep: per_head(all_deals.len(), heads),
            avg_calls_per_rep: per_head(all_calls.len(), heads),
        };

        tracing::info!(manager_id, team_id = %team.id, members = heads, "Team performance built");
        Ok(TeamPerformance {
            team,
            team_data,
            team_insights,
            aggregate_metrics,
        })
    }

    // -- silent deals --------------------------------------------------------

    pub async fn silent_deals(&self, user_id: &str) -> Result<Vec<SilentCrmDeal>, IntegrationError> {
        self.silent_deals_at(user_id, Utc::now()).await
    }

    /// The user's deals whose latest related call started at least five
    /// days before `now`, most neglected first, each with follow-up
    /// suggestions. Deals without any dated call rank first.
    pub async fn silent_deals_at(
        &self,
        user_id: &str,
        now: Timestamp,
    ) -> Result<Vec<SilentCrmDeal>, IntegrationError> {
        let deals = self.user_deals(user_id).await?;

        let with_calls = try_join_all(deals.into_iter().map(|deal| async move {
            let calls = self.calls.search_calls_by_crm(&deal.id, CRM_SYSTEM).await?;
            let last_contact = calls.iter().filter_map(GongCall::started).max();
            Ok::<_, IntegrationError>((deal, calls, last_contact))
        }))
        .await?;

        let ranked = rank_silent(with_calls, |(_, _, last)| *last, now);

        let mut silent = Vec::with_capacity(ranked.len());
        for ((deal, calls, last_contact), class) in ranked {
            let recommendations = self
                .ai
                .generate_follow_up_recommendations(&deal, &calls, class.days_since_contact)
                .await?;
            silent.push(SilentCrmDeal {
                deal,
                days_since_last_contact: class.days_since_contact,
                last_contact_type: if last_contact.is_some() {
                    ContactType::Call
                } else {
                    ContactType::None
                },
                last_contact_date: last_contact,
                recommendations,
            });
        }

        tracing::debug!(user_id, silent = silent.len(), "Silent CRM deals ranked");
        Ok(silent)
    }

    // -- connectivity --------------------------------------------------------

    pub async fn test_connections(&self) -> ConnectionReport {
        let (hubspot, gong) = futures::join!(self.crm.test_connection(), self.calls.test_connection());
        ConnectionReport {
            hubspot,
            gong,
            ai: ConnectionStatus::ok("AI engine ready"),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_labels() {
        assert_eq!(UserRole::from_str_value("ae"), Ok(UserRole::Ae));
        assert_eq!(UserRole::from_str_value("manager"), Ok(UserRole::Manager));
        assert!(UserRole::from_str_value("vp").unwrap_err().contains("admin, manager, ae"));
        assert_eq!(UserRole::ALL.len(), 3);
        assert_eq!(UserRole::Manager.to_string(), "manager");
        assert_eq!(serde_json::to_value(UserRole::Ae).unwrap(), "ae");
    }

    #[test]
    fn sample_directory_has_one_team() {
        let (users, teams) = sample_directory();
        assert_eq!(users.len(), 3);
        assert_eq!(teams[0].manager, "mgr-001");
        assert_eq!(users[1].hubspot_owner_id.as_deref(), Some("hs-owner-002"));
        assert_eq!(users[2].gong_user_id.as_deref(), Some("gong-user-003"));
    }

    #[test]
    fn per_head_handles_empty_team() {
        assert_eq!(per_head(4, 0), 0.0);
        assert_eq!(per_head(3, 2), 1.5);
    }
}
