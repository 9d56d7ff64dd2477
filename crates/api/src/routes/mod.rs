pub mod health;
pub mod park;
pub mod trail;

use axum::Router;

use crate::state::AppState;

/// Prefix under which [`api_routes`] is nested.
pub const API_PREFIX: &str = "/api/v1";

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /parks                 list, create
/// /parks/{id}            get, update (PATCH), delete
///
/// /trails                list, create
/// /trails/{id}           get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/parks", park::router())
        .nest("/trails", trail::router())
}
