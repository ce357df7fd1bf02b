use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dealpulse_core::validation::validate_activity;
use dealpulse_db::models::activity::{Activity, CreateActivity};
use dealpulse_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::query::RelatedRecordParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activities
///
/// Activity feed, newest first, optionally scoped to a deal and/or lead.
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<RelatedRecordParams>,
) -> AppResult<Json<DataResponse<Vec<Activity>>>> {
    let activities = ActivityRepo::list_matching(&state.pool, params.deal_id, params.lead_id).await;
    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/activities
pub async fn create_activity(
    State(state): State<AppState>,
    Json(input): Json<CreateActivity>,
) -> AppResult<(StatusCode, Json<DataResponse<Activity>>)> {
    validate_activity(&input.description)?;

    let activity = ActivityRepo::create(&state.pool, &input).await;

    tracing::info!(
        activity_id = activity.id,
        activity_type = %activity.activity_type,
        "Activity logged"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}
