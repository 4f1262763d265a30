//! Handlers for the `/vegetables` resource.

use allotment_core::types::DbId;
use allotment_db::models::vegetable::{
    CreateVegetable, UpdateVegetable, Vegetable, VegetableWithPlant,
};
use allotment_db::repositories::{PlantRepo, VegetableRepo};
use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /vegetables
pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<VegetableWithPlant>>> {
    let vegetables = VegetableRepo::list_with_plants(&state.pool).await?;
    Ok(ApiJson(vegetables))
}

/// GET /vegetables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ApiJson<VegetableWithPlant>> {
    let vegetable = VegetableRepo::find_with_plant(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Vegetable", id))?;
    Ok(ApiJson(vegetable))
}

/// POST /vegetables/new
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateVegetable>,
) -> AppResult<(StatusCode, ApiJson<Vegetable>)> {
    let input = input.validate()?;
    ensure_plant(&state, input.plant_id).await?;
    let vegetable = VegetableRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(vegetable)))
}

/// POST /vegetables/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateVegetable>,
) -> AppResult<ApiJson<Vegetable>> {
    if VegetableRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("Vegetable", id));
    }
    if let Some(plant_id) = input.plant_id {
        ensure_plant(&state, plant_id).await?;
    }
    let vegetable = VegetableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Vegetable", id))?;
    Ok(ApiJson(vegetable))
}

/// POST /vegetables/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if VegetableRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Vegetable", id))
    }
}

async fn ensure_plant(state: &AppState, plant_id: DbId) -> AppResult<()> {
    if PlantRepo::exists(&state.pool, plant_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Plant", plant_id))
    }
}
