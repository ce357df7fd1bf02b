use axum::routing::get;
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET    /    -> list_activities (?deal_id=&lead_id=)
/// POST   /    -> create_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(activities::list_activities).post(activities::create_activity),
    )
}
