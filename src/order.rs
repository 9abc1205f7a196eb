//! Ordering modes and the order-value contract
//!
//! A collection can be ordered by its keys, by its whole values, or by a
//! named field of each value. The ordering mode decides both the shape of
//! the queries sent to the store and the order value extracted from each
//! returned snapshot to drive cursor advancement.

use crate::types::{JsonValue, Snapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// OrderBy
// ============================================================================

/// How a collection is ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Order by item key
    Key,
    /// Order by whole item value
    Value,
    /// Order by a named (possibly `/`-nested) field of each value
    Field(String),
}

impl OrderBy {
    /// Create a field ordering
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(path.into())
    }

    /// The value that sorts and bound-queries `snapshot` under this mode.
    ///
    /// Always `Some` for the built-in modes: keys order as strings, whole
    /// values order as themselves, and a missing field orders as `null`.
    /// The pagination driver still checks for `None` and fails loudly
    /// rather than silently producing wrong ordering.
    pub fn order_value(&self, snapshot: &Snapshot) -> Option<JsonValue> {
        match self {
            Self::Key => Some(JsonValue::String(snapshot.key.clone())),
            Self::Value => Some(snapshot.value.clone()),
            Self::Field(path) => Some(snapshot.field(path)),
        }
    }
}

// ============================================================================
// Order value comparison
// ============================================================================

/// Total order over JSON order values.
///
/// This is the ordering contract `OrderedStore` backends must honor:
/// `null` first, then booleans (`false` before `true`), then numbers by
/// numeric value, then strings lexicographically, then arrays and objects.
/// Composite values compare equal among themselves, so runs of
/// composite-valued items fall back entirely to the key tie-break.
pub fn compare_order_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    match type_rank(a).cmp(&type_rank(b)) {
        Ordering::Equal => match (a, b) {
            (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
            (JsonValue::Number(x), JsonValue::Number(y)) => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
        rank => rank,
    }
}

fn type_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Bool(_) => 1,
        JsonValue::Number(_) => 2,
        JsonValue::String(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_value_by_key() {
        let snap = Snapshot::new("REF1", json!({"bob": 10}));
        assert_eq!(OrderBy::Key.order_value(&snap), Some(json!("REF1")));
    }

    #[test]
    fn test_order_value_by_value() {
        let snap = Snapshot::new("REF1", json!(42));
        assert_eq!(OrderBy::Value.order_value(&snap), Some(json!(42)));
    }

    #[test]
    fn test_order_value_by_field() {
        let snap = Snapshot::new("REF1", json!({"bob": 10}));
        assert_eq!(OrderBy::field("bob").order_value(&snap), Some(json!(10)));
        assert_eq!(
            OrderBy::field("missing").order_value(&snap),
            Some(JsonValue::Null)
        );
    }

    #[test]
    fn test_compare_type_ranks() {
        let ascending = [
            json!(null),
            json!(false),
            json!(true),
            json!(-2),
            json!(10),
            json!("a"),
            json!("b"),
            json!([1]),
            json!({"x": 1}),
        ];
        for window in ascending.windows(2) {
            let cmp = compare_order_values(&window[0], &window[1]);
            assert_ne!(
                cmp,
                Ordering::Greater,
                "{} should not sort after {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_compare_numbers_across_representations() {
        assert_eq!(
            compare_order_values(&json!(10), &json!(10.0)),
            Ordering::Equal
        );
        assert_eq!(
            compare_order_values(&json!(-2), &json!(5)),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_composites_equal() {
        assert_eq!(
            compare_order_values(&json!([1, 2]), &json!([9])),
            Ordering::Equal
        );
        assert_eq!(
            compare_order_values(&json!({"a": 1}), &json!({"b": 2})),
            Ordering::Equal
        );
    }
}
