//! Route definitions for the `/bug-treatments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bug_treatment;
use crate::state::AppState;

/// Routes mounted at `/bug-treatments`.
///
/// The static `/recent` segment wins over `/{id}`.
///
/// ```text
/// GET    /              -> list
/// POST   /new           -> create
/// GET    /recent        -> recent
/// GET    /{id}          -> get_by_id
/// POST   /{id}/edit     -> update
/// POST   /{id}/delete   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bug_treatment::list))
        .route("/new", post(bug_treatment::create))
        .route("/recent", get(bug_treatment::recent))
        .route("/{id}", get(bug_treatment::get_by_id))
        .route("/{id}/edit", post(bug_treatment::update))
        .route("/{id}/delete", post(bug_treatment::delete))
}
