use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{Result, StorageError};

/// Field map of a stored document, without its id
pub type Fields = Map<String, Value>;

/// A document as returned by a remote collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode the fields into a typed record
    pub fn decode<T: DeserializeOwned>(&self, collection: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            StorageError::Malformed {
                collection: collection.to_string(),
                id: self.id.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// One entry of an atomic batch update: a partial merge for a single document
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub id: String,
    pub fields: Fields,
}

impl FieldUpdate {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Encode a serializable value as document fields. The value must serialize to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StorageError::Serialization(serde::ser::Error::custom(
            format!("expected an object, got {}", other),
        ))),
    }
}

/// Apply a partial merge: every top-level key of `patch` replaces the same key in `target`
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}
