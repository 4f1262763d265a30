//! Route definitions for the `/plants` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plant;
use crate::state::AppState;

/// Routes mounted at `/plants`.
///
/// ```text
/// GET    /                  -> list
/// POST   /new               -> create
/// GET    /{id}              -> get_by_id
/// POST   /{id}/edit         -> update
/// POST   /{id}/delete       -> delete
/// GET    /{id}/vegetables   -> list_vegetables
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plant::list))
        .route("/new", post(plant::create))
        .route("/{id}", get(plant::get_by_id))
        .route("/{id}/edit", post(plant::update))
        .route("/{id}/delete", post(plant::delete))
        .route("/{id}/vegetables", get(plant::list_vegetables))
}
