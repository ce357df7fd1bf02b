//! Route definitions for the `/integrations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::integrations;
use crate::state::AppState;

/// Routes mounted at `/integrations`.
///
/// Everything except `/health` answers 503 unless HubSpot, Gong and the
/// model credentials are all configured.
///
/// ```text
/// GET  /health                         -> health
/// GET  /dashboard/{user_id}            -> user_dashboard
/// GET  /deals/{user_id}                -> user_deals
/// GET  /calls/{user_id}                -> user_calls (?days=)
/// POST /analyze-deal                   -> analyze_deal
/// POST /analyze-call                   -> analyze_call
/// POST /copilot                        -> ask_copilot
/// GET  /silent-deals/{user_id}         -> silent_deals
/// GET  /team-performance/{manager_id}  -> team_performance
/// GET  /test                           -> test_connections
/// GET  /user/{user_id}                 -> get_user
/// GET  /users/role/{role}              -> users_by_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(integrations::health))
        .route("/dashboard/{user_id}", get(integrations::user_dashboard))
        .route("/deals/{user_id}", get(integrations::user_deals))
        .route("/calls/{user_id}", get(integrations::user_calls))
        .route("/analyze-deal", post(integrations::analyze_deal))
        .route("/analyze-call", post(integrations::analyze_call))
        .route("/copilot", post(integrations::ask_copilot))
        .route("/silent-deals/{user_id}", get(integrations::silent_deals))
        .route(
            "/team-performance/{manager_id}",
            get(integrations::team_performance),
        )
        .route("/test", get(integrations::test_connections))
        .route("/user/{user_id}", get(integrations::get_user))
        .route("/users/role/{role}", get(integrations::users_by_role))
}
