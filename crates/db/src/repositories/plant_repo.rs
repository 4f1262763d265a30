//! Repository for the `plants` table.

use std::collections::HashMap;

use allotment_core::types::DbId;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::plant::{NewPlant, Plant, PlantDetail, UpdatePlant};
use crate::repositories::{LocationRepo, VegetableRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, planted_at, origin, icon, location_id, created_at, updated_at";

/// Provides CRUD operations and joined views for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a new plant, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewPlant) -> Result<Plant, sqlx::Error> {
        let query = format!(
            "INSERT INTO plants (name, planted_at, origin, icon, location_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(&input.name)
            .bind(input.planted_at)
            .bind(&input.origin)
            .bind(&input.icon)
            .bind(input.location_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a plant by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = ?1");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a plant with this ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> = sqlx::query_as("SELECT id FROM plants WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// List all plants in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants ORDER BY id ASC");
        sqlx::query_as::<_, Plant>(&query).fetch_all(pool).await
    }

    /// List the plants growing at a location.
    pub async fn list_by_location(
        pool: &SqlitePool,
        location_id: DbId,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE location_id = ?1 ORDER BY id ASC");
        sqlx::query_as::<_, Plant>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// List all plants, each with its location and harvests.
    pub async fn list_details(pool: &SqlitePool) -> Result<Vec<PlantDetail>, sqlx::Error> {
        let plants = Self::list(pool).await?;
        let locations: HashMap<DbId, _> = LocationRepo::list(pool)
            .await?
            .into_iter()
            .map(|location| (location.id, location))
            .collect();
        let mut vegetables_by_plant =
            VegetableRepo::grouped_by_plant(VegetableRepo::list(pool).await?);

        Ok(plants
            .into_iter()
            .map(|plant| PlantDetail {
                location: plant
                    .location_id
                    .and_then(|location_id| locations.get(&location_id).cloned()),
                vegetables: vegetables_by_plant.remove(&plant.id).unwrap_or_default(),
                plant,
            })
            .collect())
    }

    /// Load one plant with its location and harvests.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<PlantDetail>, sqlx::Error> {
        let Some(plant) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let location = match plant.location_id {
            Some(location_id) => LocationRepo::find_by_id(pool, location_id).await?,
            None => None,
        };
        let vegetables = VegetableRepo::list_by_plant(pool, id).await?;

        Ok(Some(PlantDetail {
            plant,
            location,
            vegetables,
        }))
    }

    /// Update a plant.
    ///
    /// `name`, `planted_at`, `origin` and `icon` are applied only when set.
    /// `location_id` is applied when the outer `Option` is set, so
    /// `Some(None)` detaches the plant.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdatePlant,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET
                name = COALESCE(?2, name),
                planted_at = COALESCE(?3, planted_at),
                origin = COALESCE(?4, origin),
                icon = COALESCE(?5, icon),
                location_id = CASE WHEN ?6 THEN ?7 ELSE location_id END,
                updated_at = ?8
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.planted_at)
            .bind(&input.origin)
            .bind(&input.icon)
            .bind(input.location_id.is_some())
            .bind(input.location_id.flatten())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Point a plant at a location, or detach it with `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_location(
        pool: &SqlitePool,
        id: DbId,
        location_id: Option<DbId>,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET location_id = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(location_id)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a plant by ID. Its harvests stay, unlinked.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plants WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
