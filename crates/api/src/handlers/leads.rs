//! Handlers for the `/leads` resource.
//!
//! Leads are scored by the repository on create and on any update that
//! touches a scoring field. The score preview endpoint runs the same
//! scoring without saving anything.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use dealpulse_core::error::CoreError;
use dealpulse_core::insights::{filter_leads, leads_to_csv};
use dealpulse_core::scoring::{score_breakdown, ScoreBand, ScoreBreakdown, ScoringInput};
use dealpulse_core::types::DbId;
use dealpulse_core::validation::validate_company_name;
use dealpulse_db::models::lead::{CreateLead, Lead, UpdateLead};
use dealpulse_db::repositories::LeadRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

const EXPORT_FILENAME: &str = "leads.csv";

/// Intake form fields that feed the score.
#[derive(Debug, Default, Deserialize)]
pub struct ScorePreviewRequest {
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub employee_count: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScorePreview {
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
    pub band: ScoreBand,
}

fn lead_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Lead", id })
}

async fn search_leads(state: &AppState, params: &SearchParams) -> Vec<Lead> {
    let leads = LeadRepo::list(&state.pool).await;
    match params.search.as_deref() {
        Some(term) => filter_leads(&leads, term).into_iter().cloned().collect(),
        None => leads,
    }
}

/// GET /api/v1/leads
///
/// List leads newest first. `?search=` matches company name or industry,
/// case-insensitively.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let leads = search_leads(&state, &params).await;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/leads/export
///
/// The (optionally filtered) lead table as a CSV attachment.
pub async fn export_leads(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let leads = search_leads(&state, &params).await;
    let refs: Vec<&Lead> = leads.iter().collect();
    let csv = leads_to_csv(&refs);

    tracing::info!(rows = leads.len(), "Leads exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

/// GET /api/v1/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await
        .ok_or_else(|| lead_not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// POST /api/v1/leads
pub async fn create_lead(
    State(state): State<AppState>,
    Json(input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    validate_company_name(&input.company_name)?;

    let lead = LeadRepo::create(&state.pool, &input).await;

    tracing::info!(lead_id = lead.id, ai_score = lead.ai_score, "Lead created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// PUT /api/v1/leads/{id}
///
/// Partial update. The score is recomputed when any scoring field is
/// present in the body.
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<Json<DataResponse<Lead>>> {
    if let Some(name) = input.company_name.as_deref() {
        validate_company_name(name)?;
    }

    let lead = LeadRepo::update(&state.pool, id, &input)
        .await
        .ok_or_else(|| lead_not_found(id))?;

    tracing::info!(lead_id = id, ai_score = lead.ai_score, "Lead updated");

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LeadRepo::delete(&state.pool, id).await {
        tracing::info!(lead_id = id, "Lead deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(lead_not_found(id))
    }
}

/// POST /api/v1/leads/score-preview
///
/// Score an intake form as the user fills it in. Nothing is stored.
pub async fn score_preview(
    Json(input): Json<ScorePreviewRequest>,
) -> AppResult<Json<DataResponse<ScorePreview>>> {
    let breakdown = score_breakdown(&ScoringInput {
        budget_range: input.budget_range.as_deref(),
        timeline: input.timeline.as_deref(),
        employee_count: input.employee_count.as_deref(),
        industry: input.industry.as_deref(),
    });
    Ok(Json(DataResponse {
        data: ScorePreview {
            band: ScoreBand::from_score(breakdown.total),
            breakdown,
        },
    }))
}
