// src/config/mod.rs

//! Typed view of the `pile.*` section of git config.
//!
//! - [`schema`] is the static table of documented fields.
//! - [`model`] holds the typed record and per-field assignment.
//! - [`loader`] turns `git config --get-regexp` output into that record.
//! - [`store`] ties the record to a backend: load, validate, revert, destroy.

pub mod loader;
pub mod model;
pub mod schema;
pub mod store;

pub use loader::{AssignError, LoadWarning, NAMESPACE};
pub use model::{ConfigValue, PileConfig};
pub use schema::{help, FieldDoc, FIELDS};
pub use store::ConfigStore;
