//! Handlers for the `/deals` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dealpulse_core::error::CoreError;
use dealpulse_core::status::DealStage;
use dealpulse_core::types::DbId;
use dealpulse_core::validation::validate_deal_fields;
use dealpulse_db::models::deal::{CreateDeal, Deal, UpdateDeal};
use dealpulse_db::repositories::DealRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the deal listing endpoint.
#[derive(Debug, Deserialize)]
pub struct DealListParams {
    /// Optional stage filter, e.g. `proposal`.
    pub stage: Option<String>,
}

fn deal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Deal", id })
}

/// GET /api/v1/deals
///
/// List deals newest first, optionally only those in `?stage=`.
pub async fn list_deals(
    State(state): State<AppState>,
    Query(params): Query<DealListParams>,
) -> AppResult<Json<DataResponse<Vec<Deal>>>> {
    let deals = match params.stage.as_deref() {
        Some(label) => {
            let stage = DealStage::from_str_value(label).map_err(CoreError::Validation)?;
            DealRepo::list_by_stage(&state.pool, stage).await
        }
        None => DealRepo::list(&state.pool).await,
    };
    Ok(Json(DataResponse { data: deals }))
}

/// GET /api/v1/deals/{id}
pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Deal>>> {
    let deal = DealRepo::find_by_id(&state.pool, id)
        .await
        .ok_or_else(|| deal_not_found(id))?;
    Ok(Json(DataResponse { data: deal }))
}

/// POST /api/v1/deals
///
/// Probability defaults to 25, health to 50 and the last contact to now.
pub async fn create_deal(
    State(state): State<AppState>,
    Json(input): Json<CreateDeal>,
) -> AppResult<(StatusCode, Json<DataResponse<Deal>>)> {
    validate_deal_fields(
        Some(input.company_name.as_str()),
        Some(input.value),
        input.probability,
        input.health_score,
    )?;

    let deal = DealRepo::create(&state.pool, &input).await;

    tracing::info!(deal_id = deal.id, stage = %deal.stage, value = deal.value, "Deal created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: deal })))
}

/// PUT /api/v1/deals/{id}
pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeal>,
) -> AppResult<Json<DataResponse<Deal>>> {
    validate_deal_fields(
        input.company_name.as_deref(),
        input.value,
        input.probability,
        input.health_score,
    )?;

    let deal = DealRepo::update(&state.pool, id, &input)
        .await
        .ok_or_else(|| deal_not_found(id))?;

    tracing::info!(deal_id = id, stage = %deal.stage, "Deal updated");

    Ok(Json(DataResponse { data: deal }))
}

/// DELETE /api/v1/deals/{id}
pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DealRepo::delete(&state.pool, id).await {
        tracing::info!(deal_id = id, "Deal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(deal_not_found(id))
    }
}
