//! Handlers for the `/plants` resource.

use allotment_core::types::DbId;
use allotment_db::models::plant::{CreatePlant, Plant, PlantDetail, UpdatePlant};
use allotment_db::models::vegetable::Vegetable;
use allotment_db::repositories::{LocationRepo, PlantRepo, VegetableRepo};
use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /plants
pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<PlantDetail>>> {
    let plants = PlantRepo::list_details(&state.pool).await?;
    Ok(ApiJson(plants))
}

/// GET /plants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<PlantDetail>> {
    let plant = PlantRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Plant", id))?;
    Ok(ApiJson(plant))
}

/// POST /plants/new
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreatePlant>,
) -> AppResult<(StatusCode, ApiJson<Plant>)> {
    let input = input.validate()?;
    if let Some(location_id) = input.location_id {
        ensure_location(&state, location_id).await?;
    }
    let plant = PlantRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(plant)))
}

/// POST /plants/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdatePlant>,
) -> AppResult<ApiJson<Plant>> {
    if !PlantRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Plant", id));
    }
    if let Some(Some(location_id)) = input.location_id {
        ensure_location(&state, location_id).await?;
    }
    let plant = PlantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Plant", id))?;
    Ok(ApiJson(plant))
}

/// POST /plants/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if PlantRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Plant", id))
    }
}

/// GET /plants/{id}/vegetables
pub async fn list_vegetables(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<Vec<Vegetable>>> {
    if !PlantRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Plant", id));
    }
    let vegetables = VegetableRepo::list_by_plant(&state.pool, id).await?;
    Ok(ApiJson(vegetables))
}

async fn ensure_location(state: &AppState, location_id: DbId) -> AppResult<()> {
    if LocationRepo::exists(&state.pool, location_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Location", location_id))
    }
}
