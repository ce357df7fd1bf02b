use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dealpulse_core::validation::validate_call_note;
use dealpulse_db::models::call_note::{CallNote, CreateCallNote};
use dealpulse_db::repositories::CallNoteRepo;

use crate::error::AppResult;
use crate::query::RelatedRecordParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/call-notes
pub async fn list_call_notes(
    State(state): State<AppState>,
    Query(params): Query<RelatedRecordParams>,
) -> AppResult<Json<DataResponse<Vec<CallNote>>>> {
    let notes = CallNoteRepo::list_matching(&state.pool, params.deal_id, params.lead_id).await;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/v1/call-notes
pub async fn create_call_note(
    State(state): State<AppState>,
    Json(input): Json<CreateCallNote>,
) -> AppResult<(StatusCode, Json<DataResponse<CallNote>>)> {
    validate_call_note(&input.summary, input.call_duration)?;

    let note = CallNoteRepo::create(&state.pool, &input).await;

    tracing::info!(call_note_id = note.id, deal_id = ?note.deal_id, "Call note recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}
