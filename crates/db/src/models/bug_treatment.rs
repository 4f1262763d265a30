//! Bug treatment model, DTOs and joined views.

use allotment_core::error::CoreError;
use allotment_core::input;
use allotment_core::types::{DbId, Timestamp};
use allotment_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::location::{Location, LocationSummary};

/// Shared by every missing-field case on create.
pub const CREATE_REQUIRED_MESSAGE: &str = "Type, date, and locationId are required.";

/// A treatment row from the `bug_treatments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugTreatment {
    pub id: DbId,
    #[serde(rename = "type")]
    pub treatment_type: String,
    pub date: Timestamp,
    pub location_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a treatment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBugTreatment {
    #[serde(rename = "type", default, deserialize_with = "input::optional_text")]
    pub treatment_type: Option<String>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub date: Option<Timestamp>,
    #[serde(default, deserialize_with = "input::optional_id")]
    pub location_id: Option<DbId>,
}

impl CreateBugTreatment {
    /// Check required fields, yielding the insert struct.
    pub fn validate(self) -> Result<NewBugTreatment, CoreError> {
        Ok(NewBugTreatment {
            treatment_type: require(self.treatment_type, CREATE_REQUIRED_MESSAGE)?,
            date: require(self.date, CREATE_REQUIRED_MESSAGE)?,
            location_id: require(self.location_id, CREATE_REQUIRED_MESSAGE)?,
        })
    }
}

/// Validated insert for a treatment.
#[derive(Debug, Clone)]
pub struct NewBugTreatment {
    pub treatment_type: String,
    pub date: Timestamp,
    pub location_id: DbId,
}

/// DTO for updating a treatment.
///
/// `type` and `date` are ignored when empty. `locationId` is applied
/// whenever the key is present; `null` detaches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBugTreatment {
    #[serde(rename = "type", default, deserialize_with = "input::optional_text")]
    pub treatment_type: Option<String>,
    #[serde(default, deserialize_with = "input::optional_timestamp")]
    pub date: Option<Timestamp>,
    #[serde(default, deserialize_with = "input::nullable_id")]
    pub location_id: Option<Option<DbId>>,
}

/// A treatment with the location it was applied at.
#[derive(Debug, Clone, Serialize)]
pub struct BugTreatmentWithLocation {
    #[serde(flatten)]
    pub treatment: BugTreatment,
    #[serde(rename = "Location")]
    pub location: Option<Location>,
}

/// The latest treatment at one location, from the recent-treatments report.
#[derive(Debug, Clone, Serialize)]
pub struct RecentTreatment {
    #[serde(flatten)]
    pub treatment: BugTreatment,
    #[serde(rename = "Location")]
    pub location: LocationSummary,
}
