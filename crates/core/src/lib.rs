//! Pure domain logic for the allotment records backend.
//!
//! Nothing in this crate performs I/O. The `db` crate persists the entities
//! and the `api` crate exposes them over HTTP; both lean on the types, error
//! enum, validation helpers and input deserializers defined here.

pub mod error;
pub mod harvest;
pub mod input;
pub mod types;
pub mod validation;
