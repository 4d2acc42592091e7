//! Resource records as returned by the backend.
//!
//! DESIGN
//! ======
//! Records stay schemaless (`serde_json::Map`) so one list/form pipeline
//! serves every resource. The only field the client relies on is `id`,
//! which is checked once at deserialization time. There are no mutating
//! accessors: a record is replaced wholesale, never edited in place.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

// =============================================================================
// RECORD ID
// =============================================================================

/// Backend-assigned identifier. The API hands out integers for most
/// resources, but string ids are accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Error returned when a JSON object cannot be accepted as a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record has no `id` field")]
    MissingId,
    #[error("record `id` must be an integer or a non-empty string, got {0}")]
    InvalidId(String),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),
}

// =============================================================================
// RECORD
// =============================================================================

/// One row of a resource collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object, validating its `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when `id` is missing or not a usable id.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, RecordError> {
        let raw = fields.get("id").ok_or(RecordError::MissingId)?;
        let id = RecordId::from_value(raw).ok_or_else(|| RecordError::InvalidId(raw.to_string()))?;
        Ok(Self { id, fields })
    }

    /// Build a record from any JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] for non-object values, plus the
    /// errors of [`Record::from_fields`].
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(RecordError::NotAnObject(type_name(&other).to_owned())),
        }
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Raw field value, `None` when the record does not carry the field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field names in the order the backend sent them.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = RecordError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Text form of a field value as shown in a table cell or CSV column.
/// Strings are unquoted, `null` and missing values are empty.
#[must_use]
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
