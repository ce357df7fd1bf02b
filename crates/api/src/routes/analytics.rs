//! Route definitions for the dashboard aggregates.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /metrics             -> get_metrics
/// GET /pipeline-summary    -> pipeline_summary (?top=)
/// GET /silent-deals        -> silent_deals
/// GET /insights            -> insights
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(analytics::get_metrics))
        .route("/pipeline-summary", get(analytics::pipeline_summary))
        .route("/silent-deals", get(analytics::silent_deals))
        .route("/insights", get(analytics::insights))
}
