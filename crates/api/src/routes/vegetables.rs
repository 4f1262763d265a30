//! Route definitions for the `/vegetables` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vegetable;
use crate::state::AppState;

/// Routes mounted at `/vegetables`.
///
/// ```text
/// GET    /              -> list
/// POST   /new           -> create
/// GET    /{id}          -> get_by_id
/// POST   /{id}/edit     -> update
/// POST   /{id}/delete   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vegetable::list))
        .route("/new", post(vegetable::create))
        .route("/{id}", get(vegetable::get_by_id))
        .route("/{id}/edit", post(vegetable::update))
        .route("/{id}/delete", post(vegetable::delete))
}
