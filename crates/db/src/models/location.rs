//! Location entity model, DTOs and joined views.

use allotment_core::error::CoreError;
use allotment_core::input;
use allotment_core::types::{DbId, Timestamp};
use allotment_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::bug_treatment::BugTreatment;
use crate::models::plant::PlantWithVegetables;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    #[serde(default, deserialize_with = "input::optional_text")]
    pub name: Option<String>,
}

impl CreateLocation {
    /// Check required fields, yielding the insert struct.
    pub fn validate(self) -> Result<NewLocation, CoreError> {
        let name = require(self.name, "Location name is required.")?;
        Ok(NewLocation { name })
    }
}

/// Validated insert for a location.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
}

/// DTO for updating a location. An empty name leaves the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    #[serde(default, deserialize_with = "input::optional_text")]
    pub name: Option<String>,
}

/// `{id, name}` projection used when a location is nested in another row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationSummary {
    pub id: DbId,
    pub name: String,
}

/// `{id, name}` of a plant growing at a location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationPlantRef {
    pub id: DbId,
    pub name: String,
}

/// `{id, type, date}` of a treatment applied at a location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationTreatmentRef {
    pub id: DbId,
    #[serde(rename = "type")]
    pub treatment_type: String,
    pub date: Timestamp,
}

/// A location as listed: its plants and only its most recent treatment.
#[derive(Debug, Clone, Serialize)]
pub struct LocationOverview {
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "Plants")]
    pub plants: Vec<LocationPlantRef>,
    /// Holds at most one element.
    #[serde(rename = "BugTreatments")]
    pub bug_treatments: Vec<LocationTreatmentRef>,
}

/// A single location with everything that lives there.
#[derive(Debug, Clone, Serialize)]
pub struct LocationDetail {
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "Plants")]
    pub plants: Vec<PlantWithVegetables>,
    /// Most recent first.
    #[serde(rename = "BugTreatments")]
    pub bug_treatments: Vec<BugTreatment>,
}

/// Row counts removed by a cascading location delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub vegetables: u64,
    pub plants: u64,
    pub bug_treatments: u64,
}
