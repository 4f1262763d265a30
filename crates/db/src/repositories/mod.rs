//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod bug_treatment_repo;
pub mod location_repo;
pub mod plant_repo;
pub mod vegetable_repo;

pub use bug_treatment_repo::BugTreatmentRepo;
pub use location_repo::LocationRepo;
pub use plant_repo::PlantRepo;
pub use vegetable_repo::VegetableRepo;
