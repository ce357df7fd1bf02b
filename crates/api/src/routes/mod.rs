pub mod activities;
pub mod analytics;
pub mod call_notes;
pub mod deals;
pub mod health;
pub mod integrations;
pub mod leads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leads                         list (?search=), create
/// /leads/export                  CSV download (?search=)
/// /leads/score-preview           score an intake form without saving
/// /leads/{id}                    get, update, delete
///
/// /deals                         list (?stage=), create
/// /deals/{id}                    get, update, delete
///
/// /activities                    list (?deal_id=&lead_id=), create
/// /call-notes                    list (?deal_id=&lead_id=), create
///
/// /metrics                       portfolio metrics
/// /pipeline-summary              per-stage summary (?top=)
/// /silent-deals                  ranked silent deals
/// /insights                      insight cards
///
/// /integrations/health           credential availability (always on)
/// /integrations/...              CRM, call and model features (503 when unconfigured)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/leads", leads::router())
        .nest("/deals", deals::router())
        .nest("/activities", activities::router())
        .nest("/call-notes", call_notes::router())
        .nest("/integrations", integrations::router())
        .merge(analytics::router())
}
