//! Handler for the monthly harvest report.

use allotment_core::harvest::MonthYear;
use allotment_db::models::vegetable::VegetableWithPlant;
use allotment_db::repositories::VegetableRepo;
use axum::extract::State;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /harvest/{month_year}
///
/// Harvests within one calendar month (server local time), newest first.
pub async fn by_month(
    State(state): State<AppState>,
    ApiPath(token): ApiPath<String>,
) -> AppResult<ApiJson<Vec<VegetableWithPlant>>> {
    let month = MonthYear::parse(&token)?;
    let (start, end) = month.local_bounds();
    tracing::debug!(%start, %end, "Harvest report range");

    let vegetables = VegetableRepo::list_harvested_between(&state.pool, start, end).await?;
    Ok(ApiJson(vegetables))
}
