//! Changeset record types

use serde::{Deserialize, Serialize};

/// One changeset as served by the changeset host
///
/// Only `create`, `modify` and `delete` are read; everything else the host
/// sends is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Changeset(serde_json::Value);

impl Changeset {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Top-level field lookup
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }
}

/// The "no data" changeset: an empty record with no fields at all
impl Default for Changeset {
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl From<serde_json::Value> for Changeset {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Result of one download attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// HTTP 200 with a JSON body
    Found(Changeset),
    /// HTTP 404
    NotFound,
    /// Any other non-200 status
    Unavailable(u16),
    /// DNS, connect, timeout or unparsable body
    TransientError(String),
}

impl FetchOutcome {
    /// Collapse to the historical "changeset or nothing" contract
    pub fn into_changeset(self) -> Option<Changeset> {
        match self {
            FetchOutcome::Found(changeset) => Some(changeset),
            _ => None,
        }
    }
}
