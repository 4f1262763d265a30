//! Integration tests for entity CRUD against a real SQLite database.
//!
//! Exercises the repository layer end to end:
//! - Create/find round trips for every entity
//! - Partial update policies (keep vs. clear)
//! - Plain deletes and the transactional location cascade

use allotment_db::models::bug_treatment::{NewBugTreatment, UpdateBugTreatment};
use allotment_db::models::location::{CascadeSummary, NewLocation, UpdateLocation};
use allotment_db::models::plant::{NewPlant, UpdatePlant};
use allotment_db::models::vegetable::{NewVegetable, UpdateVegetable};
use allotment_db::repositories::{BugTreatmentRepo, LocationRepo, PlantRepo, VegetableRepo};
use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_location(name: &str) -> NewLocation {
    NewLocation {
        name: name.to_string(),
    }
}

fn new_plant(name: &str, location_id: Option<i64>) -> NewPlant {
    NewPlant {
        name: name.to_string(),
        planted_at: None,
        origin: None,
        icon: None,
        location_id,
    }
}

fn new_vegetable(plant_id: i64, rating: Option<i64>, quantity: Option<i64>) -> NewVegetable {
    NewVegetable {
        rating,
        quantity,
        harvested_at: None,
        plant_id,
    }
}

fn new_treatment(location_id: i64, kind: &str, day: u32) -> NewBugTreatment {
    NewBugTreatment {
        treatment_type: kind.to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
        location_id,
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_round_trip(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Greenhouse"))
        .await
        .unwrap();
    let planted_at = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
    let plant = PlantRepo::create(
        &pool,
        &NewPlant {
            name: "Tomato".to_string(),
            planted_at: Some(planted_at),
            origin: Some("seed swap".to_string()),
            icon: Some("tomato.png".to_string()),
            location_id: Some(location.id),
        },
    )
    .await
    .unwrap();

    let found = PlantRepo::find_by_id(&pool, plant.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Tomato");
    assert_eq!(found.planted_at, Some(planted_at));
    assert_eq!(found.origin.as_deref(), Some("seed swap"));
    assert_eq!(found.icon.as_deref(), Some("tomato.png"));
    assert_eq!(found.location_id, Some(location.id));
    assert_eq!(found.created_at, plant.created_at);

    let found = LocationRepo::find_by_id(&pool, location.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Greenhouse");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_missing_returns_none(pool: SqlitePool) {
    assert!(LocationRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(PlantRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(VegetableRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(BugTreatmentRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(!LocationRepo::exists(&pool, 999).await.unwrap());
    assert!(!PlantRepo::exists(&pool, 999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_plant_detail_nests_location_and_vegetables(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Bed 1")).await.unwrap();
    let plant = PlantRepo::create(&pool, &new_plant("Courgette", Some(location.id)))
        .await
        .unwrap();
    VegetableRepo::create(&pool, &new_vegetable(plant.id, Some(4), Some(2)))
        .await
        .unwrap();
    VegetableRepo::create(&pool, &new_vegetable(plant.id, Some(5), Some(1)))
        .await
        .unwrap();

    let detail = PlantRepo::find_detail(&pool, plant.id).await.unwrap().unwrap();
    assert_eq!(detail.location.unwrap().id, location.id);
    assert_eq!(detail.vegetables.len(), 2);

    let lonely = PlantRepo::create(&pool, &new_plant("Mint", None)).await.unwrap();
    let details = PlantRepo::list_details(&pool).await.unwrap();
    let lonely_detail = details.iter().find(|d| d.plant.id == lonely.id).unwrap();
    assert!(lonely_detail.location.is_none());
    assert!(lonely_detail.vegetables.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_location_overview_keeps_only_latest_treatment(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Plot 7")).await.unwrap();
    PlantRepo::create(&pool, &new_plant("Beans", Some(location.id)))
        .await
        .unwrap();
    BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Neem oil", 1))
        .await
        .unwrap();
    let latest = BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Soap spray", 20))
        .await
        .unwrap();
    BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Nematodes", 10))
        .await
        .unwrap();
    let empty = LocationRepo::create(&pool, &new_location("Empty")).await.unwrap();

    let overviews = LocationRepo::list_overviews(&pool).await.unwrap();
    assert_eq!(overviews.len(), 2);

    let plot = &overviews[0];
    assert_eq!(plot.location.id, location.id);
    assert_eq!(plot.plants.len(), 1);
    assert_eq!(plot.plants[0].name, "Beans");
    assert_eq!(plot.bug_treatments.len(), 1);
    assert_eq!(plot.bug_treatments[0].id, latest.id);

    let bare = &overviews[1];
    assert_eq!(bare.location.id, empty.id);
    assert!(bare.plants.is_empty());
    assert!(bare.bug_treatments.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_location_detail_sorts_treatments_newest_first(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Orchard")).await.unwrap();
    let plant = PlantRepo::create(&pool, &new_plant("Apple", Some(location.id)))
        .await
        .unwrap();
    VegetableRepo::create(&pool, &new_vegetable(plant.id, None, Some(12)))
        .await
        .unwrap();
    for (kind, day) in [("A", 3), ("B", 28), ("C", 15)] {
        BugTreatmentRepo::create(&pool, &new_treatment(location.id, kind, day))
            .await
            .unwrap();
    }

    let detail = LocationRepo::find_detail(&pool, location.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.plants.len(), 1);
    assert_eq!(detail.plants[0].vegetables.len(), 1);
    let kinds: Vec<_> = detail
        .bug_treatments
        .iter()
        .map(|t| t.treatment_type.as_str())
        .collect();
    assert_eq!(kinds, vec!["B", "C", "A"]);
}

// ---------------------------------------------------------------------------
// Update policies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_location_update_without_name_keeps_name(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Bed 2")).await.unwrap();

    let unchanged = LocationRepo::update(&pool, location.id, &UpdateLocation { name: None })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Bed 2");

    let renamed = LocationRepo::update(
        &pool,
        location.id,
        &UpdateLocation {
            name: Some("Raised bed".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Raised bed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_plant_update_location_policy(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Bed 3")).await.unwrap();
    let plant = PlantRepo::create(&pool, &new_plant("Leek", Some(location.id)))
        .await
        .unwrap();

    // Absent key keeps the link.
    let kept = PlantRepo::update(
        &pool,
        plant.id,
        &UpdatePlant {
            origin: Some("garden centre".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(kept.location_id, Some(location.id));
    assert_eq!(kept.name, "Leek");
    assert_eq!(kept.origin.as_deref(), Some("garden centre"));

    // Explicit null clears it.
    let cleared = PlantRepo::update(
        &pool,
        plant.id,
        &UpdatePlant {
            location_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.location_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_vegetable_rating_only_update_preserves_other_fields(pool: SqlitePool) {
    let plant = PlantRepo::create(&pool, &new_plant("Carrot", None)).await.unwrap();
    let harvested_at = Utc.with_ymd_and_hms(2024, 7, 2, 18, 30, 0).unwrap();
    let vegetable = VegetableRepo::create(
        &pool,
        &NewVegetable {
            rating: Some(3),
            quantity: Some(10),
            harvested_at: Some(harvested_at),
            plant_id: plant.id,
        },
    )
    .await
    .unwrap();

    let updated = VegetableRepo::update(
        &pool,
        vegetable.id,
        &UpdateVegetable {
            rating: Some(Some(5)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.rating, Some(5));
    assert_eq!(updated.quantity, Some(10));
    assert_eq!(updated.harvested_at, Some(harvested_at));
    assert_eq!(updated.plant_id, Some(plant.id));

    let cleared = VegetableRepo::update(
        &pool,
        vegetable.id,
        &UpdateVegetable {
            quantity: Some(None),
            rating: Some(Some(0)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.quantity, None);
    assert_eq!(cleared.rating, Some(0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bug_treatment_update_keeps_unset_fields(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Bed 4")).await.unwrap();
    let treatment = BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Neem oil", 5))
        .await
        .unwrap();

    let updated = BugTreatmentRepo::update(
        &pool,
        treatment.id,
        &UpdateBugTreatment {
            treatment_type: Some("Garlic spray".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.treatment_type, "Garlic spray");
    assert_eq!(updated.date, treatment.date);
    assert_eq!(updated.location_id, Some(location.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_returns_none(pool: SqlitePool) {
    let result = PlantRepo::update(&pool, 42, &UpdatePlant::default()).await.unwrap();
    assert!(result.is_none());
    let result = PlantRepo::set_location(&pool, 42, None).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_plant_delete_unlinks_vegetables(pool: SqlitePool) {
    let plant = PlantRepo::create(&pool, &new_plant("Pea", None)).await.unwrap();
    let vegetable = VegetableRepo::create(&pool, &new_vegetable(plant.id, None, Some(30)))
        .await
        .unwrap();

    assert!(PlantRepo::delete(&pool, plant.id).await.unwrap());
    assert!(!PlantRepo::delete(&pool, plant.id).await.unwrap());

    let orphan = VegetableRepo::find_by_id(&pool, vegetable.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(orphan.plant_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_location_delete_cascades(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Doomed")).await.unwrap();
    let keep = LocationRepo::create(&pool, &new_location("Survivor")).await.unwrap();

    for name in ["Squash", "Pumpkin"] {
        let plant = PlantRepo::create(&pool, &new_plant(name, Some(location.id)))
            .await
            .unwrap();
        VegetableRepo::create(&pool, &new_vegetable(plant.id, Some(4), Some(1)))
            .await
            .unwrap();
    }
    for day in [1, 2, 3] {
        BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Slug pellets", day))
            .await
            .unwrap();
    }
    let survivor_plant = PlantRepo::create(&pool, &new_plant("Kale", Some(keep.id)))
        .await
        .unwrap();
    BugTreatmentRepo::create(&pool, &new_treatment(keep.id, "Netting", 4))
        .await
        .unwrap();

    let summary = LocationRepo::delete_cascade(&pool, location.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        summary,
        CascadeSummary {
            vegetables: 2,
            plants: 2,
            bug_treatments: 3,
        }
    );

    assert!(LocationRepo::find_by_id(&pool, location.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "locations").await, 1);
    assert_eq!(count(&pool, "plants").await, 1);
    assert_eq!(count(&pool, "vegetables").await, 0);
    assert_eq!(count(&pool, "bug_treatments").await, 1);
    assert!(PlantRepo::find_by_id(&pool, survivor_plant.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_location_delete_missing_changes_nothing(pool: SqlitePool) {
    LocationRepo::create(&pool, &new_location("Bed")).await.unwrap();
    assert!(LocationRepo::delete_cascade(&pool, 999).await.unwrap().is_none());
    assert_eq!(count(&pool, "locations").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_location_delete_cascade_rolls_back_on_failure(pool: SqlitePool) {
    let location = LocationRepo::create(&pool, &new_location("Locked")).await.unwrap();
    let plant = PlantRepo::create(&pool, &new_plant("Leek", Some(location.id)))
        .await
        .unwrap();
    VegetableRepo::create(&pool, &new_vegetable(plant.id, Some(3), Some(2)))
        .await
        .unwrap();
    BugTreatmentRepo::create(&pool, &new_treatment(location.id, "Fleece", 5))
        .await
        .unwrap();

    // The final statement of the cascade fails after the child rows are gone.
    sqlx::query(
        "CREATE TRIGGER block_location_delete BEFORE DELETE ON locations \
         BEGIN SELECT RAISE(ABORT, 'location delete blocked'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    assert!(LocationRepo::delete_cascade(&pool, location.id).await.is_err());

    assert_eq!(count(&pool, "locations").await, 1);
    assert_eq!(count(&pool, "plants").await, 1);
    assert_eq!(count(&pool, "vegetables").await, 1);
    assert_eq!(count(&pool, "bug_treatments").await, 1);
}
