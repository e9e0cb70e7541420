//! Row, field, and cell keys.
//!
//! All per-row tracking state (snapshots, undo ledger, error map) is
//! indexed by these types. `RowKey` normalizes string and numeric
//! identifiers so `"7"` and `7` address the same logical row; `CellKey`
//! is a structural composite of row and field, so it cannot collide the
//! way a delimited string concatenation could.

use std::fmt;

use serde_json::Value;

use crate::error::ModelError;

/// Normalized row identifier.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRowKey(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build a key from a JSON identifier value (string or number).
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(ModelError::InvalidRowKey(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RowKey {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for RowKey {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Name of one editable field on a row.
///
/// The identifier field is never addressed as a `FieldName`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidFieldName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key identifying one editable cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    row: RowKey,
    field: FieldName,
}

impl CellKey {
    pub fn new(row: RowKey, field: FieldName) -> Self {
        Self { row, field }
    }

    pub fn row(&self) -> &RowKey {
        &self.row
    }

    pub fn field(&self) -> &FieldName {
        &self.field
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row, self.field)
    }
}
