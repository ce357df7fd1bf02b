use axum::routing::get;
use axum::Router;

use crate::handlers::call_notes;
use crate::state::AppState;

/// Routes mounted at `/call-notes`.
///
/// ```text
/// GET    /    -> list_call_notes (?deal_id=&lead_id=)
/// POST   /    -> create_call_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(call_notes::list_call_notes).post(call_notes::create_call_note),
    )
}
