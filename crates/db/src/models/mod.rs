//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO plus the validated insert struct it yields
//! - A `Deserialize` update DTO (all `Option` fields) for partial edits
//! - `Serialize` views that nest related rows the way the frontend reads them

pub mod bug_treatment;
pub mod location;
pub mod plant;
pub mod vegetable;
