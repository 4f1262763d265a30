//! Plant entity model, DTOs and joined views.

use allotment_core::error::CoreError;
use allotment_core::input;
use allotment_core::types::{DbId, Timestamp};
use allotment_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::location::Location;
use crate::models::vegetable::Vegetable;

/// A plant row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: DbId,
    pub name: String,
    pub planted_at: Option<Timestamp>,
    pub origin: Option<String>,
    pub icon: Option<String>,
    pub location_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new plant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlant {
    #[serde(default, deserialize_with = "input::optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub planted_at: Option<Timestamp>,
    pub origin: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub location_id: Option<DbId>,
}

impl CreatePlant {
    /// Check required fields, yielding the insert struct.
    pub fn validate(self) -> Result<NewPlant, CoreError> {
        let name = require(self.name, "Plant name is required.")?;
        Ok(NewPlant {
            name,
            planted_at: self.planted_at,
            origin: self.origin,
            icon: self.icon,
            location_id: self.location_id,
        })
    }
}

/// Validated insert for a plant.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub planted_at: Option<Timestamp>,
    pub origin: Option<String>,
    pub icon: Option<String>,
    pub location_id: Option<DbId>,
}

/// DTO for updating a plant.
///
/// `name`, `plantedAt`, `origin` and `icon` are ignored when empty.
/// `locationId` is applied whenever the key is present; `null` detaches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlant {
    #[serde(default, deserialize_with = "input::optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub planted_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "input::optional_text")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "input::optional_text")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "input::nullable_id")]
    pub location_id: Option<Option<DbId>>,
}

/// A plant with its location and harvests.
#[derive(Debug, Clone, Serialize)]
pub struct PlantDetail {
    #[serde(flatten)]
    pub plant: Plant,
    #[serde(rename = "Location")]
    pub location: Option<Location>,
    #[serde(rename = "Vegetables")]
    pub vegetables: Vec<Vegetable>,
}

/// A plant with its harvests, as nested under a location.
#[derive(Debug, Clone, Serialize)]
pub struct PlantWithVegetables {
    #[serde(flatten)]
    pub plant: Plant,
    #[serde(rename = "Vegetables")]
    pub vegetables: Vec<Vegetable>,
}
