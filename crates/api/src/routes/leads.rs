//! Route definitions for the `/leads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /                 -> list_leads (?search=)
/// POST   /                 -> create_lead
/// GET    /export           -> export_leads (?search=)
/// POST   /score-preview    -> score_preview
/// GET    /{id}             -> get_lead
/// PUT    /{id}             -> update_lead
/// DELETE /{id}             -> delete_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route("/export", get(leads::export_leads))
        .route("/score-preview", post(leads::score_preview))
        .route(
            "/{id}",
            get(leads::get_lead)
                .put(leads::update_lead)
                .delete(leads::delete_lead),
        )
}
