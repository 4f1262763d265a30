//! Vegetable (harvest record) model, DTOs and joined views.

use allotment_core::error::CoreError;
use allotment_core::input;
use allotment_core::types::{DbId, Timestamp};
use allotment_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::plant::Plant;

/// A harvest row from the `vegetables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vegetable {
    pub id: DbId,
    pub rating: Option<i64>,
    pub quantity: Option<i64>,
    pub harvested_at: Option<Timestamp>,
    pub plant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a harvest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVegetable {
    #[serde(default, deserialize_with = "input::optional_int")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "input::optional_int")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub harvested_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub plant_id: Option<DbId>,
}

impl CreateVegetable {
    /// Check required fields, yielding the insert struct.
    pub fn validate(self) -> Result<NewVegetable, CoreError> {
        let plant_id = require(self.plant_id, "PlantId is required.")?;
        Ok(NewVegetable {
            rating: self.rating,
            quantity: self.quantity,
            harvested_at: self.harvested_at,
            plant_id,
        })
    }
}

/// Validated insert for a harvest.
#[derive(Debug, Clone)]
pub struct NewVegetable {
    pub rating: Option<i64>,
    pub quantity: Option<i64>,
    pub harvested_at: Option<Timestamp>,
    pub plant_id: DbId,
}

/// DTO for updating a harvest.
///
/// `rating` and `quantity` are applied whenever the key is present (so `0`
/// and `null` are stored). `harvestedAt` and `plantId` are ignored when
/// empty or zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVegetable {
    #[serde(default, deserialize_with = "input::nullable_int")]
    pub rating: Option<Option<i64>>,
    #[serde(default, deserialize_with = "input::nullable_int")]
    pub quantity: Option<Option<i64>>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub harvested_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub plant_id: Option<DbId>,
}

/// A harvest with the plant it came from.
#[derive(Debug, Clone, Serialize)]
pub struct VegetableWithPlant {
    #[serde(flatten)]
    pub vegetable: Vegetable,
    #[serde(rename = "Plant")]
    pub plant: Option<Plant>,
}
