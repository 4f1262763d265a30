//! Route definitions for the `/locations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /                      -> list
/// POST   /new                   -> create
/// GET    /{id}                  -> get_by_id
/// POST   /{id}/edit             -> update
/// POST   /{id}/delete           -> delete
/// GET    /{id}/bug-treatments   -> list_bug_treatments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list))
        .route("/new", post(location::create))
        .route("/{id}", get(location::get_by_id))
        .route("/{id}/edit", post(location::update))
        .route("/{id}/delete", post(location::delete))
        .route("/{id}/bug-treatments", get(location::list_bug_treatments))
}
