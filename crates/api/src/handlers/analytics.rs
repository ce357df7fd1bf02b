//! Handlers for the dashboard aggregates computed over the record store.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use dealpulse_core::insights::{build_insight_cards, silent_deals as rank_silent_deals, InsightCard};
use dealpulse_core::pipeline::{compute_metrics, summarize_by_stage, PortfolioMetrics, StageSummary};
use dealpulse_core::status::ACTIVE_PIPELINE_STAGES;
use dealpulse_db::models::deal::Deal;
use dealpulse_db::repositories::{DealRepo, LeadRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the pipeline summary.
#[derive(Debug, Deserialize)]
pub struct PipelineSummaryParams {
    /// Deals listed per stage; all when absent.
    pub top: Option<usize>,
}

/// A silent deal with its days since last contact (`null` if never).
#[derive(Debug, Serialize)]
pub struct SilentDeal {
    #[serde(flatten)]
    pub deal: Deal,
    pub days_since_contact: Option<i64>,
}

/// GET /api/v1/metrics
pub async fn get_metrics(State(state): State<AppState>) -> AppResult<Json<DataResponse<PortfolioMetrics>>> {
    let leads = LeadRepo::list(&state.pool).await;
    let deals = DealRepo::list(&state.pool).await;
    Ok(Json(DataResponse {
        data: compute_metrics(&leads, &deals),
    }))
}

/// GET /api/v1/pipeline-summary
///
/// One entry per active stage in pipeline order. `?top=` caps the deals
/// listed per stage without changing its count or value.
pub async fn pipeline_summary(
    State(state): State<AppState>,
    Query(params): Query<PipelineSummaryParams>,
) -> AppResult<Json<DataResponse<Vec<StageSummary<Deal>>>>> {
    let deals = DealRepo::list(&state.pool).await;
    let mut summary = summarize_by_stage(&deals, &ACTIVE_PIPELINE_STAGES);
    if let Some(top) = params.top {
        summary.iter_mut().for_each(|s| s.truncate_deals(top));
    }
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/silent-deals
///
/// Deals with no contact for five or more days, most neglected first.
pub async fn silent_deals(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<SilentDeal>>>> {
    let deals = DealRepo::list(&state.pool).await;
    let silent: Vec<SilentDeal> = rank_silent_deals(&deals, Utc::now())
        .into_iter()
        .map(|(deal, class)| SilentDeal {
            deal: deal.clone(),
            days_since_contact: class.days_since_contact,
        })
        .collect();
    Ok(Json(DataResponse { data: silent }))
}

/// GET /api/v1/insights
pub async fn insights(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<InsightCard>>>> {
    let leads = LeadRepo::list(&state.pool).await;
    let deals = DealRepo::list(&state.pool).await;
    Ok(Json(DataResponse {
        data: build_insight_cards(&leads, &deals, Utc::now()),
    }))
}
