use axum::routing::get;
use axum::Router;

use crate::handlers::harvest;
use crate::state::AppState;

/// Routes mounted at `/harvest`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{month_year}", get(harvest::by_month))
}
