//! Sektor records and the errors the CRUD helper records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A stored record: an `id` plus whatever fields the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SektorRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SektorRecord {
    /// Build a record. An `id` entry inside `fields` is dropped in favour of `id`.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self { id: id.into(), fields }.normalized()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self.normalized()
    }

    /// Strip a stray `id` from `fields` so serialization never emits two.
    #[must_use]
    pub(crate) fn normalized(mut self) -> Self {
        self.fields.remove("id");
        self
    }
}

/// Older payloads may carry numeric ids; keep them as their decimal text.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SektorOp {
    Load,
    Add,
    Update,
    Delete,
}

impl SektorOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for SektorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SektorError {
    /// Storage or serialization failed during `op`.
    #[error("Failed to {op} sektor: {reason}")]
    Storage { op: SektorOp, reason: String },

    /// `update_sektor` was given an id that is not in the list.
    #[error("Failed to update sektor: sektor {id} not found")]
    NotFound { id: String },
}

impl SektorError {
    pub(crate) fn storage(op: SektorOp, reason: impl ToString) -> Self {
        Self::Storage { op, reason: reason.to_string() }
    }

    #[must_use]
    pub fn op(&self) -> SektorOp {
        match self {
            Self::Storage { op, .. } => *op,
            Self::NotFound { .. } => SektorOp::Update,
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
