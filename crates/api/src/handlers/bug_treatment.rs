//! Handlers for the `/bug-treatments` resource.

use allotment_core::types::DbId;
use allotment_db::models::bug_treatment::{
    BugTreatment, BugTreatmentWithLocation, CreateBugTreatment, RecentTreatment,
    UpdateBugTreatment,
};
use allotment_db::repositories::{BugTreatmentRepo, LocationRepo};
use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /bug-treatments
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<BugTreatmentWithLocation>>> {
    let treatments = BugTreatmentRepo::list_with_locations(&state.pool).await?;
    Ok(ApiJson(treatments))
}

/// GET /bug-treatments/recent
///
/// The latest treatment of every location that has been treated.
pub async fn recent(State(state): State<AppState>) -> AppResult<ApiJson<Vec<RecentTreatment>>> {
    let treatments = BugTreatmentRepo::recent_report(&state.pool).await?;
    Ok(ApiJson(treatments))
}

/// GET /bug-treatments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<BugTreatmentWithLocation>> {
    let treatment = BugTreatmentRepo::find_with_location(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("BugTreatment", id))?;
    Ok(ApiJson(treatment))
}

/// POST /bug-treatments/new
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBugTreatment>,
) -> AppResult<(StatusCode, ApiJson<BugTreatment>)> {
    let input = input.validate()?;
    ensure_location(&state, input.location_id).await?;
    let treatment = BugTreatmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(treatment)))
}

/// POST /bug-treatments/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateBugTreatment>,
) -> AppResult<ApiJson<BugTreatment>> {
    if BugTreatmentRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("BugTreatment", id));
    }
    if let Some(Some(location_id)) = input.location_id {
        ensure_location(&state, location_id).await?;
    }
    let treatment = BugTreatmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("BugTreatment", id))?;
    Ok(ApiJson(treatment))
}

/// POST /bug-treatments/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if BugTreatmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("BugTreatment", id))
    }
}

async fn ensure_location(state: &AppState, location_id: DbId) -> AppResult<()> {
    if LocationRepo::exists(&state.pool, location_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Location", location_id))
    }
}
