//! Repository for the `bug_treatments` table.

use std::collections::HashMap;

use allotment_core::types::DbId;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::bug_treatment::{
    BugTreatment, BugTreatmentWithLocation, NewBugTreatment, RecentTreatment, UpdateBugTreatment,
};
use crate::models::location::LocationSummary;
use crate::repositories::LocationRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, treatment_type, date, location_id, created_at, updated_at";

/// Provides CRUD operations and reports for bug treatments.
pub struct BugTreatmentRepo;

impl BugTreatmentRepo {
    /// Insert a new treatment, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &NewBugTreatment,
    ) -> Result<BugTreatment, sqlx::Error> {
        let query = format!(
            "INSERT INTO bug_treatments (treatment_type, date, location_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugTreatment>(&query)
            .bind(&input.treatment_type)
            .bind(input.date)
            .bind(input.location_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a treatment by its ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<BugTreatment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bug_treatments WHERE id = ?1");
        sqlx::query_as::<_, BugTreatment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all treatments, most recent first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<BugTreatment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bug_treatments ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, BugTreatment>(&query).fetch_all(pool).await
    }

    /// List the treatments applied at a location, most recent first.
    pub async fn list_by_location(
        pool: &SqlitePool,
        location_id: DbId,
    ) -> Result<Vec<BugTreatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bug_treatments
             WHERE location_id = ?1
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, BugTreatment>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// The single most recent treatment of every location that has one.
    ///
    /// Among treatments sharing the latest date the highest id wins. Rows
    /// come back most recent first.
    pub async fn latest_per_location(pool: &SqlitePool) -> Result<Vec<BugTreatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bug_treatments AS bt
             WHERE bt.location_id IS NOT NULL
               AND bt.id = (
                   SELECT latest.id FROM bug_treatments AS latest
                   WHERE latest.location_id = bt.location_id
                   ORDER BY latest.date DESC, latest.id DESC
                   LIMIT 1
               )
             ORDER BY bt.date DESC, bt.id DESC"
        );
        sqlx::query_as::<_, BugTreatment>(&query).fetch_all(pool).await
    }

    /// The recent-treatments report: [`Self::latest_per_location`] with each
    /// row's `{id, name}` location attached.
    pub async fn recent_report(pool: &SqlitePool) -> Result<Vec<RecentTreatment>, sqlx::Error> {
        let locations: HashMap<DbId, LocationSummary> = LocationRepo::list(pool)
            .await?
            .into_iter()
            .map(|location| {
                (
                    location.id,
                    LocationSummary {
                        id: location.id,
                        name: location.name,
                    },
                )
            })
            .collect();

        Ok(Self::latest_per_location(pool)
            .await?
            .into_iter()
            .filter_map(|treatment| {
                let location = locations.get(&treatment.location_id?)?.clone();
                Some(RecentTreatment {
                    treatment,
                    location,
                })
            })
            .collect())
    }

    /// List all treatments, each with its location, most recent first.
    pub async fn list_with_locations(
        pool: &SqlitePool,
    ) -> Result<Vec<BugTreatmentWithLocation>, sqlx::Error> {
        let treatments = Self::list(pool).await?;
        let locations: HashMap<DbId, _> = LocationRepo::list(pool)
            .await?
            .into_iter()
            .map(|location| (location.id, location))
            .collect();

        Ok(treatments
            .into_iter()
            .map(|treatment| BugTreatmentWithLocation {
                location: treatment
                    .location_id
                    .and_then(|location_id| locations.get(&location_id).cloned()),
                treatment,
            })
            .collect())
    }

    /// Load one treatment with its location.
    pub async fn find_with_location(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<BugTreatmentWithLocation>, sqlx::Error> {
        let Some(treatment) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let location = match treatment.location_id {
            Some(location_id) => LocationRepo::find_by_id(pool, location_id).await?,
            None => None,
        };
        Ok(Some(BugTreatmentWithLocation {
            treatment,
            location,
        }))
    }

    /// Update a treatment.
    ///
    /// `treatment_type` and `date` are applied only when set. `location_id`
    /// is applied when the outer `Option` is set, so `Some(None)` detaches.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateBugTreatment,
    ) -> Result<Option<BugTreatment>, sqlx::Error> {
        let query = format!(
            "UPDATE bug_treatments SET
                treatment_type = COALESCE(?2, treatment_type),
                date = COALESCE(?3, date),
                location_id = CASE WHEN ?4 THEN ?5 ELSE location_id END,
                updated_at = ?6
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugTreatment>(&query)
            .bind(id)
            .bind(&input.treatment_type)
            .bind(input.date)
            .bind(input.location_id.is_some())
            .bind(input.location_id.flatten())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Point a treatment at a location, or detach it with `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_location(
        pool: &SqlitePool,
        id: DbId,
        location_id: Option<DbId>,
    ) -> Result<Option<BugTreatment>, sqlx::Error> {
        let query = format!(
            "UPDATE bug_treatments SET location_id = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugTreatment>(&query)
            .bind(id)
            .bind(location_id)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a treatment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bug_treatments WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
