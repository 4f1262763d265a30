//! Repository for the `vegetables` table.

use std::collections::HashMap;

use allotment_core::types::{DbId, Timestamp};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::vegetable::{NewVegetable, UpdateVegetable, Vegetable, VegetableWithPlant};
use crate::repositories::PlantRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rating, quantity, harvested_at, plant_id, created_at, updated_at";

/// Most recent harvest first; undated harvests last.
const NEWEST_FIRST: &str = "ORDER BY harvested_at IS NULL, harvested_at DESC, id DESC";

/// Provides CRUD operations and reports for harvests.
pub struct VegetableRepo;

impl VegetableRepo {
    /// Insert a new harvest, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewVegetable) -> Result<Vegetable, sqlx::Error> {
        let query = format!(
            "INSERT INTO vegetables (rating, quantity, harvested_at, plant_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vegetable>(&query)
            .bind(input.rating)
            .bind(input.quantity)
            .bind(input.harvested_at)
            .bind(input.plant_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a harvest by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Vegetable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vegetables WHERE id = ?1");
        sqlx::query_as::<_, Vegetable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all harvests in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Vegetable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vegetables ORDER BY id ASC");
        sqlx::query_as::<_, Vegetable>(&query).fetch_all(pool).await
    }

    /// List the harvests of one plant, newest first.
    pub async fn list_by_plant(
        pool: &SqlitePool,
        plant_id: DbId,
    ) -> Result<Vec<Vegetable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vegetables WHERE plant_id = ?1 {NEWEST_FIRST}");
        sqlx::query_as::<_, Vegetable>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }

    /// List the harvests of every plant growing at a location, newest first.
    pub async fn list_by_location(
        pool: &SqlitePool,
        location_id: DbId,
    ) -> Result<Vec<Vegetable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vegetables
             WHERE plant_id IN (SELECT id FROM plants WHERE location_id = ?1)
             {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Vegetable>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Bucket harvests by plant, keeping their relative order. Unlinked
    /// harvests are dropped.
    pub fn grouped_by_plant(vegetables: Vec<Vegetable>) -> HashMap<DbId, Vec<Vegetable>> {
        let mut grouped: HashMap<DbId, Vec<Vegetable>> = HashMap::new();
        for vegetable in vegetables {
            if let Some(plant_id) = vegetable.plant_id {
                grouped.entry(plant_id).or_default().push(vegetable);
            }
        }
        grouped
    }

    /// Attach each harvest's plant.
    async fn with_plants(
        pool: &SqlitePool,
        vegetables: Vec<Vegetable>,
    ) -> Result<Vec<VegetableWithPlant>, sqlx::Error> {
        let plants: HashMap<DbId, _> = PlantRepo::list(pool)
            .await?
            .into_iter()
            .map(|plant| (plant.id, plant))
            .collect();

        Ok(vegetables
            .into_iter()
            .map(|vegetable| VegetableWithPlant {
                plant: vegetable
                    .plant_id
                    .and_then(|plant_id| plants.get(&plant_id).cloned()),
                vegetable,
            })
            .collect())
    }

    /// List all harvests, each with its plant.
    pub async fn list_with_plants(
        pool: &SqlitePool,
    ) -> Result<Vec<VegetableWithPlant>, sqlx::Error> {
        let vegetables = Self::list(pool).await?;
        Self::with_plants(pool, vegetables).await
    }

    /// Load one harvest with its plant.
    pub async fn find_with_plant(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<VegetableWithPlant>, sqlx::Error> {
        let Some(vegetable) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let plant = match vegetable.plant_id {
            Some(plant_id) => PlantRepo::find_by_id(pool, plant_id).await?,
            None => None,
        };
        Ok(Some(VegetableWithPlant { vegetable, plant }))
    }

    /// Harvests whose `harvested_at` falls within `[start, end]`, each with
    /// its plant, newest first.
    pub async fn list_harvested_between(
        pool: &SqlitePool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<VegetableWithPlant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vegetables
             WHERE harvested_at BETWEEN ?1 AND ?2
             {NEWEST_FIRST}"
        );
        let vegetables = sqlx::query_as::<_, Vegetable>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;
        Self::with_plants(pool, vegetables).await
    }

    /// Update a harvest.
    ///
    /// `rating` and `quantity` are applied when the outer `Option` is set, so
    /// `Some(None)` clears them. `harvested_at` and `plant_id` are applied
    /// only when set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateVegetable,
    ) -> Result<Option<Vegetable>, sqlx::Error> {
        let query = format!(
            "UPDATE vegetables SET
                rating = CASE WHEN ?2 THEN ?3 ELSE rating END,
                quantity = CASE WHEN ?4 THEN ?5 ELSE quantity END,
                harvested_at = COALESCE(?6, harvested_at),
                plant_id = COALESCE(?7, plant_id),
                updated_at = ?8
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vegetable>(&query)
            .bind(id)
            .bind(input.rating.is_some())
            .bind(input.rating.flatten())
            .bind(input.quantity.is_some())
            .bind(input.quantity.flatten())
            .bind(input.harvested_at)
            .bind(input.plant_id)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a harvest by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vegetables WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
