//! Repository for the `locations` table.

use std::collections::HashMap;

use allotment_core::types::DbId;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::location::{
    CascadeSummary, Location, LocationDetail, LocationOverview, LocationPlantRef,
    LocationTreatmentRef, NewLocation, UpdateLocation,
};
use crate::models::plant::PlantWithVegetables;
use crate::repositories::{BugTreatmentRepo, PlantRepo, VegetableRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations and joined views for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewLocation) -> Result<Location, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO locations (name, created_at, updated_at)
             VALUES (?1, ?2, ?2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = ?1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a location with this ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> = sqlx::query_as("SELECT id FROM locations WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// List all locations in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY id ASC");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// List all locations, each with the `{id, name}` of its plants and
    /// only its most recent treatment.
    pub async fn list_overviews(pool: &SqlitePool) -> Result<Vec<LocationOverview>, sqlx::Error> {
        let locations = Self::list(pool).await?;

        let mut plants_by_location: HashMap<DbId, Vec<LocationPlantRef>> = HashMap::new();
        for plant in PlantRepo::list(pool).await? {
            if let Some(location_id) = plant.location_id {
                plants_by_location
                    .entry(location_id)
                    .or_default()
                    .push(LocationPlantRef {
                        id: plant.id,
                        name: plant.name,
                    });
            }
        }

        let mut latest_by_location: HashMap<DbId, LocationTreatmentRef> = HashMap::new();
        for treatment in BugTreatmentRepo::latest_per_location(pool).await? {
            if let Some(location_id) = treatment.location_id {
                latest_by_location.insert(
                    location_id,
                    LocationTreatmentRef {
                        id: treatment.id,
                        treatment_type: treatment.treatment_type,
                        date: treatment.date,
                    },
                );
            }
        }

        Ok(locations
            .into_iter()
            .map(|location| LocationOverview {
                plants: plants_by_location.remove(&location.id).unwrap_or_default(),
                bug_treatments: latest_by_location.remove(&location.id).into_iter().collect(),
                location,
            })
            .collect())
    }

    /// Load one location with its plants (each with its harvests) and all of
    /// its treatments, most recent first.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<LocationDetail>, sqlx::Error> {
        let Some(location) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let plants = PlantRepo::list_by_location(pool, id).await?;
        let mut vegetables_by_plant = VegetableRepo::grouped_by_plant(
            VegetableRepo::list_by_location(pool, id).await?,
        );
        let plants = plants
            .into_iter()
            .map(|plant| PlantWithVegetables {
                vegetables: vegetables_by_plant.remove(&plant.id).unwrap_or_default(),
                plant,
            })
            .collect();

        let bug_treatments = BugTreatmentRepo::list_by_location(pool, id).await?;

        Ok(Some(LocationDetail {
            location,
            plants,
            bug_treatments,
        }))
    }

    /// Update a location. An absent name leaves the stored one.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE(?2, name),
                updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a location together with its plants, their harvests and the
    /// treatments applied there, all in one transaction.
    ///
    /// Returns `None` (and changes nothing) if the location does not exist.
    pub async fn delete_cascade(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CascadeSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<(DbId,)> = sqlx::query_as("SELECT id FROM locations WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Ok(None);
        }

        let vegetables = sqlx::query(
            "DELETE FROM vegetables
             WHERE plant_id IN (SELECT id FROM plants WHERE location_id = ?1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let plants = sqlx::query("DELETE FROM plants WHERE location_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let bug_treatments = sqlx::query("DELETE FROM bug_treatments WHERE location_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM locations WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            location_id = id,
            plants,
            vegetables,
            bug_treatments,
            "Deleted location with dependents",
        );

        Ok(Some(CascadeSummary {
            vegetables,
            plants,
            bug_treatments,
        }))
    }
}
