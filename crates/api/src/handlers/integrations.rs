//! Handlers for the `/integrations` resource.
//!
//! Every handler except [`health`] needs the integration service and
//! answers 503 when it was not configured at startup.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use dealpulse_core::types::Timestamp;
use dealpulse_core::validation::validate_required_text;
use dealpulse_integrations::config::ServiceAvailability;
use dealpulse_integrations::gong::GongCall;
use dealpulse_integrations::hubspot::HubSpotDeal;
use dealpulse_integrations::service::{
    CallAnalysisReport, ConnectionReport, CopilotAnswer, DealAnalysisReport, SalesUser,
    SilentCrmDeal, TeamPerformance, UserDashboard, UserRole, DEFAULT_CALL_DAYS,
    MAX_CALL_DAYS,
};
use dealpulse_integrations::{IntegrationError, IntegrationService};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const NOT_CONFIGURED: &str =
    "Integration services not available. Please configure API tokens.";

fn require_integrations(state: &AppState) -> AppResult<Arc<IntegrationService>> {
    state
        .integrations
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable(NOT_CONFIGURED.to_string()))
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct IntegrationHealth {
    /// `ready` or `not_configured`.
    pub status: &'static str,
    pub services: ServiceAvailability,
    pub timestamp: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CallsParams {
    /// Look-back window in days; non-positive values fall back to 30 and
    /// larger ones are capped at 365.
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeDealRequest {
    pub deal_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeCallRequest {
    pub call_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CopilotRequest {
    pub question: String,
    pub user_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/integrations/health
pub async fn health(State(state): State<AppState>) -> Json<DataResponse<IntegrationHealth>> {
    let status = if state.integrations.is_some() {
        "ready"
    } else {
        "not_configured"
    };
    Json(DataResponse {
        data: IntegrationHealth {
            status,
            services: state.integration_availability,
            timestamp: Utc::now(),
        },
    })
}

/// GET /api/v1/integrations/dashboard/{user_id}
pub async fn user_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<UserDashboard>>> {
    let service = require_integrations(&state)?;
    let dashboard = service.user_dashboard(&user_id).await?;
    Ok(Json(DataResponse { data: dashboard }))
}

/// GET /api/v1/integrations/deals/{user_id}
pub async fn user_deals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<HubSpotDeal>>>> {
    let service = require_integrations(&state)?;
    let deals = service.user_deals(&user_id).await?;
    Ok(Json(DataResponse { data: deals }))
}

/// GET /api/v1/integrations/calls/{user_id}
pub async fn user_calls(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<CallsParams>,
) -> AppResult<Json<DataResponse<Vec<GongCall>>>> {
    let service = require_integrations(&state)?;
    let days = params
        .days
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_CALL_DAYS)
        .min(MAX_CALL_DAYS);
    let calls = service.user_calls(&user_id, days).await?;
    Ok(Json(DataResponse { data: calls }))
}

/// POST /api/v1/integrations/analyze-deal
pub async fn analyze_deal(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeDealRequest>,
) -> AppResult<Json<DataResponse<DealAnalysisReport>>> {
    let service = require_integrations(&state)?;
    validate_required_text(&input.deal_id, "deal_id")?;
    validate_required_text(&input.user_id, "user_id")?;

    let report = service.analyze_deal(&input.deal_id, &input.user_id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/integrations/analyze-call
pub async fn analyze_call(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeCallRequest>,
) -> AppResult<Json<DataResponse<CallAnalysisReport>>> {
    let service = require_integrations(&state)?;
    validate_required_text(&input.call_id, "call_id")?;

    let report = service.analyze_call(&input.call_id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/integrations/copilot
pub async fn ask_copilot(
    State(state): State<AppState>,
    Json(input): Json<CopilotRequest>,
) -> AppResult<Json<DataResponse<CopilotAnswer>>> {
    let service = require_integrations(&state)?;
    validate_required_text(&input.question, "question")?;
    validate_required_text(&input.user_id, "user_id")?;

    let answer = service.ask_copilot(&input.question, &input.user_id).await?;
    tracing::info!(user_id = %input.user_id, deals = answer.context.deals_count, "Copilot answered");
    Ok(Json(DataResponse { data: answer }))
}

/// GET /api/v1/integrations/silent-deals/{user_id}
pub async fn silent_deals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<SilentCrmDeal>>>> {
    let service = require_integrations(&state)?;
    let deals = service.silent_deals(&user_id).await?;
    Ok(Json(DataResponse { data: deals }))
}

/// GET /api/v1/integrations/team-performance/{manager_id}
pub async fn team_performance(
    State(state): State<AppState>,
    Path(manager_id): Path<String>,
) -> AppResult<Json<DataResponse<TeamPerformance>>> {
    let service = require_integrations(&state)?;
    let performance = service.team_performance(&manager_id).await?;
    Ok(Json(DataResponse { data: performance }))
}

/// GET /api/v1/integrations/test
pub async fn test_connections(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ConnectionReport>>> {
    let service = require_integrations(&state)?;
    Ok(Json(DataResponse {
        data: service.test_connections().await,
    }))
}

/// GET /api/v1/integrations/user/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<SalesUser>>> {
    let service = require_integrations(&state)?;
    let user = service
        .get_user(&user_id)
        .cloned()
        .ok_or(IntegrationError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/integrations/users/role/{role}
pub async fn users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<Json<DataResponse<Vec<SalesUser>>>> {
    let service = require_integrations(&state)?;
    let role = UserRole::from_str_value(&role).map_err(AppError::BadRequest)?;
    let users = service.users_by_role(role).into_iter().cloned().collect();
    Ok(Json(DataResponse { data: users }))
}
