pub mod bug_treatments;
pub mod harvest;
pub mod health;
pub mod locations;
pub mod plants;
pub mod relationships;
pub mod vegetables;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree served on the API domain.
///
/// Route hierarchy:
///
/// ```text
/// /health                                   service + database health
///
/// /locations                                list
/// /locations/new                            create (POST)
/// /locations/{id}                           get
/// /locations/{id}/edit                      update (POST)
/// /locations/{id}/delete                    cascading delete (POST)
/// /locations/{id}/bug-treatments            treatments at a location
///
/// /plants                                   list
/// /plants/new                               create (POST)
/// /plants/{id}                              get
/// /plants/{id}/edit                         update (POST)
/// /plants/{id}/delete                       delete (POST)
/// /plants/{id}/vegetables                   harvests of a plant
///
/// /vegetables                               list
/// /vegetables/new                           create (POST)
/// /vegetables/{id}                          get
/// /vegetables/{id}/edit                     update (POST)
/// /vegetables/{id}/delete                   delete (POST)
///
/// /harvest/{month_year}                     monthly harvest report
///
/// /bug-treatments                           list
/// /bug-treatments/new                       create (POST)
/// /bug-treatments/recent                    latest treatment per location
/// /bug-treatments/{id}                      get
/// /bug-treatments/{id}/edit                 update (POST)
/// /bug-treatments/{id}/delete               delete (POST)
///
/// /attachPlantToLocation                    link (POST)
/// /detachPlantFromLocation                  unlink (POST)
/// /attachBugTreatmentToLocation             link (POST)
/// /detachBugTreatmentFromLocation           unlink (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/locations", locations::router())
        .nest("/plants", plants::router())
        .nest("/vegetables", vegetables::router())
        .nest("/harvest", harvest::router())
        .nest("/bug-treatments", bug_treatments::router())
        .merge(relationships::router())
}
