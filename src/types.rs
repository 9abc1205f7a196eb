//! Common types used throughout pagewalk
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Snapshot
// ============================================================================

/// One item of an ordered collection: its unique key plus its full value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The item's unique key within its collection
    pub key: String,
    /// The item's full value
    pub value: JsonValue,
}

impl Snapshot {
    /// Create a snapshot from a key and value
    pub fn new(key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Value of a nested field of this snapshot, `/`-separated.
    ///
    /// A field that does not exist (or is reached through a non-object)
    /// reads as JSON `null`, which is also how absent fields order.
    pub fn field(&self, path: &str) -> JsonValue {
        let mut current = &self.value;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            match current.get(part) {
                Some(value) => current = value,
                None => return JsonValue::Null,
            }
        }
        current.clone()
    }

    /// Decode the snapshot's value into a typed record
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Identity of a public pagination entry point.
///
/// Carried inside validation errors so a failure is attributed to the
/// function the caller invoked, never to an internal pagination helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    ByKey,
    ByKeyTransformed,
    ByKeyForEach,
    ByValue,
    ByValueTransformed,
    ByValueForEach,
    ByField,
    ByFieldTransformed,
    ByFieldForEach,
}

impl EntryPoint {
    /// The public function name this entry point corresponds to
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByKey => "by_key",
            Self::ByKeyTransformed => "by_key_transformed",
            Self::ByKeyForEach => "by_key_for_each",
            Self::ByValue => "by_value",
            Self::ByValueTransformed => "by_value_transformed",
            Self::ByValueForEach => "by_value_for_each",
            Self::ByField => "by_field",
            Self::ByFieldTransformed => "by_field_transformed",
            Self::ByFieldForEach => "by_field_for_each",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_field_top_level() {
        let snap = Snapshot::new("REF1", json!({"bob": 10, "name": "alice"}));
        assert_eq!(snap.field("bob"), json!(10));
        assert_eq!(snap.field("name"), json!("alice"));
    }

    #[test]
    fn test_snapshot_field_nested() {
        let snap = Snapshot::new("REF1", json!({"stats": {"score": 42}}));
        assert_eq!(snap.field("stats/score"), json!(42));
    }

    #[test]
    fn test_snapshot_field_missing_is_null() {
        let snap = Snapshot::new("REF1", json!({"bob": 10}));
        assert_eq!(snap.field("missing"), JsonValue::Null);
        assert_eq!(snap.field("bob/deeper"), JsonValue::Null);

        let scalar = Snapshot::new("REF2", json!(5));
        assert_eq!(scalar.field("bob"), JsonValue::Null);
    }

    #[test]
    fn test_snapshot_decode() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct User {
            name: String,
            age: u32,
        }

        let snap = Snapshot::new("u1", json!({"name": "alice", "age": 30}));
        let user: User = snap.decode().unwrap();
        assert_eq!(
            user,
            User {
                name: "alice".to_string(),
                age: 30
            }
        );

        let bad = Snapshot::new("u2", json!({"name": "bob"}));
        assert!(bad.decode::<User>().is_err());
    }

    #[test]
    fn test_entry_point_display() {
        assert_eq!(EntryPoint::ByKey.to_string(), "by_key");
        assert_eq!(EntryPoint::ByValueForEach.to_string(), "by_value_for_each");
        assert_eq!(
            EntryPoint::ByFieldTransformed.to_string(),
            "by_field_transformed"
        );
    }
}
