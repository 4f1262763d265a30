//! Handlers for the `/locations` resource.

use allotment_core::types::DbId;
use allotment_db::models::bug_treatment::BugTreatment;
use allotment_db::models::location::{
    CreateLocation, Location, LocationDetail, LocationOverview, UpdateLocation,
};
use allotment_db::repositories::{BugTreatmentRepo, LocationRepo};
use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /locations
pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<LocationOverview>>> {
    let locations = LocationRepo::list_overviews(&state.pool).await?;
    Ok(ApiJson(locations))
}

/// GET /locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<LocationDetail>> {
    let location = LocationRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Location", id))?;
    Ok(ApiJson(location))
}

/// POST /locations/new
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateLocation>,
) -> AppResult<(StatusCode, ApiJson<Location>)> {
    let input = input.validate()?;
    let location = LocationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(location)))
}

/// POST /locations/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateLocation>,
) -> AppResult<ApiJson<Location>> {
    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Location", id))?;
    Ok(ApiJson(location))
}

/// POST /locations/{id}/delete
///
/// Removes the location's plants (with their harvests) and treatments too.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    match LocationRepo::delete_cascade(&state.pool, id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::not_found("Location", id)),
    }
}

/// GET /locations/{id}/bug-treatments
pub async fn list_bug_treatments(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<Vec<BugTreatment>>> {
    if !LocationRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Location", id));
    }
    let treatments = BugTreatmentRepo::list_by_location(&state.pool, id).await?;
    Ok(ApiJson(treatments))
}
