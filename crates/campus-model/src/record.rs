//! The record interface the edit engine works against.
//!
//! Rows are arbitrary application records; the engine only needs an
//! identifier plus field-level `get`/`set`. Implementing [`Record`] for
//! a concrete DTO keeps field access typed instead of falling back to
//! structural indexing. [`JsonRecord`] covers callers whose rows are
//! plain JSON objects.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::keys::{FieldName, RowKey};

/// A field-to-value map, sent to and optionally returned by the update
/// capability. A patch returned by the server is authoritative and gets
/// merged back into the row.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Patch(BTreeMap<FieldName, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch carrying a single field, the shape every cell save sends.
    pub fn single(field: FieldName, value: Value) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field, value);
        Self(map)
    }

    pub fn insert(&mut self, field: FieldName, value: Value) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: &FieldName) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(FieldName, Value)> for Patch {
    fn from_iter<I: IntoIterator<Item = (FieldName, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Narrow row-access interface used by the edit engine.
///
/// `Clone` is required because snapshots are shallow copies of the row.
pub trait Record: Clone {
    /// Normalized identifier for this row.
    fn id(&self) -> RowKey;

    /// Current value of an editable field, if the field exists.
    fn get(&self, field: &FieldName) -> Option<Value>;

    /// Overwrite one editable field.
    fn set(&mut self, field: &FieldName, value: Value);

    /// Merge every field of a patch into this row.
    fn apply_patch(&mut self, patch: &Patch) {
        for (field, value) in patch.iter() {
            self.set(field, value.clone());
        }
    }
}

/// A row backed by a plain JSON object.
///
/// The identifier is extracted from the object's `id` member at
/// construction time and is not editable afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JsonRecord {
    id: RowKey,
    fields: serde_json::Map<String, Value>,
}

impl JsonRecord {
    /// Field holding the row identifier in the source object.
    pub const ID_FIELD: &'static str = "id";

    pub fn from_object(mut object: serde_json::Map<String, Value>) -> Result<Self, ModelError> {
        let raw_id = object
            .remove(Self::ID_FIELD)
            .ok_or_else(|| ModelError::MissingIdentifier(Self::ID_FIELD.to_string()))?;
        let id = RowKey::from_value(&raw_id)?;
        Ok(Self { id, fields: object })
    }

    /// Build from any JSON value, rejecting non-objects.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(ModelError::NotAnObject(other.to_string())),
        }
    }

    pub fn fields(&self) -> &serde_json::Map<String, Value> {
        &self.fields
    }
}

impl Record for JsonRecord {
    fn id(&self) -> RowKey {
        self.id.clone()
    }

    fn get(&self, field: &FieldName) -> Option<Value> {
        self.fields.get(field.as_str()).cloned()
    }

    fn set(&mut self, field: &FieldName, value: Value) {
        self.fields.insert(field.as_str().to_string(), value);
    }
}
