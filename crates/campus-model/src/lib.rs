//! Row, key, and value model for Campus Studio editable tables.
//!
//! This crate defines the data model the inline-edit engine is generic
//! over:
//!
//! - [`RowKey`] / [`FieldName`] / [`CellKey`] - validated keys for
//!   per-row and per-cell tracking state
//! - [`Record`] - the narrow `id`/`get`/`set` interface over arbitrary
//!   record shapes
//! - [`Patch`] - the field-to-value payload exchanged with the update
//!   capability
//! - [`JsonRecord`] - a ready-made [`Record`] over plain JSON objects

pub mod error;
pub mod keys;
pub mod record;
pub mod value;

pub use error::{ModelError, Result};
pub use keys::{CellKey, FieldName, RowKey};
pub use record::{JsonRecord, Patch, Record};
