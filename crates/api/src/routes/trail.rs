//! Route definitions for the `/trails` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trail;
use crate::state::AppState;

/// Routes mounted at `/trails`.
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
        .route("/", get(trail::list).post(trail::create))
        .route(
            "/{id}",
            get(trail::get_by_id)
                .patch(trail::update)
                .delete(trail::delete),
        )
}
