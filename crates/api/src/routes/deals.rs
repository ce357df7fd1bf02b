//! Route definitions for the `/deals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::deals;
use crate::state::AppState;

/// Routes mounted at `/deals`.
///
/// ```text
/// GET    /        -> list_deals (?stage=)
/// POST   /        -> create_deal
/// GET    /{id}    -> get_deal
/// PUT    /{id}    -> update_deal
/// DELETE /{id}    -> delete_deal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(deals::list_deals).post(deals::create_deal))
        .route(
            "/{id}",
            get(deals::get_deal)
                .put(deals::update_deal)
                .delete(deals::delete_deal),
        )
}
