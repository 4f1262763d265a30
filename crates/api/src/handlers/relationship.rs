//! Handlers that link and unlink children from their location.
//!
//! Attach checks the child first and the location second, so a request
//! naming two missing rows reports the child.

use allotment_core::input;
use allotment_core::types::DbId;
use allotment_core::validation::{require, require_both};
use allotment_db::models::bug_treatment::BugTreatment;
use allotment_db::models::plant::Plant;
use allotment_db::repositories::{BugTreatmentRepo, LocationRepo, PlantRepo};
use axum::extract::State;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPlant {
    #[serde(default, deserialize_with = "input::optional_id")]
    pub plant_id: Option<DbId>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub location_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachPlant {
    #[serde(default, deserialize_with = "input::optional_id")]
    pub plant_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachBugTreatment {
    #[serde(default, deserialize_with = "input::optional_id")]
    pub bug_treatment_id: Option<DbId>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub location_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachBugTreatment {
    #[serde(default, deserialize_with = "input::optional_id")]
    pub bug_treatment_id: Option<DbId>,
}

/// POST /attachPlantToLocation
pub async fn attach_plant(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AttachPlant>,
) -> AppResult<ApiJson<Plant>> {
    let (plant_id, location_id) = require_both(
        input.plant_id,
        input.location_id,
        "Plant ID and Location ID are required.",
    )?;
    if !PlantRepo::exists(&state.pool, plant_id).await? {
        return Err(AppError::not_found("Plant", plant_id));
    }
    if !LocationRepo::exists(&state.pool, location_id).await? {
        return Err(AppError::not_found("Location", location_id));
    }

    let plant = PlantRepo::set_location(&state.pool, plant_id, Some(location_id))
        .await?
        .ok_or(AppError::not_found("Plant", plant_id))?;
    tracing::debug!(plant_id, location_id, "Attached plant to location");
    Ok(ApiJson(plant))
}

/// POST /detachPlantFromLocation
pub async fn detach_plant(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DetachPlant>,
) -> AppResult<ApiJson<Plant>> {
    let plant_id = require(input.plant_id, "Plant ID is required.")?;
    let plant = PlantRepo::set_location(&state.pool, plant_id, None)
        .await?
        .ok_or(AppError::not_found("Plant", plant_id))?;
    Ok(ApiJson(plant))
}

/// POST /attachBugTreatmentToLocation
pub async fn attach_bug_treatment(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AttachBugTreatment>,
) -> AppResult<ApiJson<BugTreatment>> {
    let (treatment_id, location_id) = require_both(
        input.bug_treatment_id,
        input.location_id,
        "Bug Treatment ID and Location ID are required.",
    )?;
    if BugTreatmentRepo::find_by_id(&state.pool, treatment_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("BugTreatment", treatment_id));
    }
    if !LocationRepo::exists(&state.pool, location_id).await? {
        return Err(AppError::not_found("Location", location_id));
    }

    let treatment = BugTreatmentRepo::set_location(&state.pool, treatment_id, Some(location_id))
        .await?
        .ok_or(AppError::not_found("BugTreatment", treatment_id))?;
    tracing::debug!(treatment_id, location_id, "Attached bug treatment to location");
    Ok(ApiJson(treatment))
}

/// POST /detachBugTreatmentFromLocation
pub async fn detach_bug_treatment(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DetachBugTreatment>,
) -> AppResult<ApiJson<BugTreatment>> {
    let treatment_id = require(input.bug_treatment_id, "Bug Treatment ID is required.")?;
    let treatment = BugTreatmentRepo::set_location(&state.pool, treatment_id, None)
        .await?
        .ok_or(AppError::not_found("BugTreatment", treatment_id))?;
    Ok(ApiJson(treatment))
}
