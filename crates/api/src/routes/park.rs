//! Route definitions for the `/parks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::park;
use crate::state::AppState;

/// Routes mounted at `/parks`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(park::list).post(park::create))
        .route(
            "/{id}",
            get(park::get_by_id)
                .patch(park::update)
                .delete(park::delete),
        )
}
