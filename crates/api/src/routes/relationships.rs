use axum::routing::post;
use axum::Router;

use crate::handlers::relationship;
use crate::state::AppState;

/// Attach/detach routes, mounted at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attachPlantToLocation", post(relationship::attach_plant))
        .route("/detachPlantFromLocation", post(relationship::detach_plant))
        .route(
            "/attachBugTreatmentToLocation",
            post(relationship::attach_bug_treatment),
        )
        .route(
            "/detachBugTreatmentFromLocation",
            post(relationship::detach_bug_treatment),
        )
}
