//! Tests for the store module

use super::*;
use crate::order::OrderBy;
use pretty_assertions::assert_eq;
use serde_json::json;

fn page(order_by: OrderBy, filter: QueryFilter, limit: usize) -> PageQuery {
    PageQuery {
        order_by,
        filter,
        limit_to_first: limit,
    }
}

fn unbounded() -> QueryFilter {
    QueryFilter::Range {
        start_at: None,
        end_at: None,
    }
}

fn keys(snapshots: &[Snapshot]) -> Vec<&str> {
    snapshots.iter().map(|s| s.key.as_str()).collect()
}

// ============================================================================
// CRUD helpers
// ============================================================================

#[tokio::test]
async fn test_insert_and_fetch_child() {
    let store = MemoryStore::new();
    store.insert("users", "u1", json!({"name": "alice"})).await;

    let snap = store.fetch_child("users", "u1").await.unwrap().unwrap();
    assert_eq!(snap.key, "u1");
    assert_eq!(snap.value, json!({"name": "alice"}));

    assert!(store.fetch_child("users", "u2").await.unwrap().is_none());
    assert!(store.fetch_child("ghosts", "u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_replaces_and_returns_previous() {
    let store = MemoryStore::new();
    assert_eq!(store.insert("c", "k", 1).await, None);
    assert_eq!(store.insert("c", "k", 2).await, Some(json!(1)));
    assert_eq!(store.len("c").await, 1);
}

#[tokio::test]
async fn test_remove() {
    let store = MemoryStore::new();
    store.insert("c", "k", 1).await;
    assert_eq!(store.remove("c", "k").await, Some(json!(1)));
    assert_eq!(store.remove("c", "k").await, None);
    assert!(store.is_empty("c").await);
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_fetch_page_orders_by_key() {
    let store = MemoryStore::new();
    store
        .insert_many("c", [("b", 2), ("a", 1), ("c", 3)])
        .await;

    let snapshots = store
        .fetch_page("c", page(OrderBy::Key, unbounded(), 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_fetch_page_orders_by_value_with_key_tie_break() {
    let store = MemoryStore::new();
    store
        .insert_many("c", [("z", 1), ("a", 2), ("m", 1), ("b", 0)])
        .await;

    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, unbounded(), 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["b", "m", "z", "a"]);
}

#[tokio::test]
async fn test_fetch_page_orders_mixed_types() {
    let store = MemoryStore::new();
    store
        .insert_many(
            "c",
            [
                ("str", json!("x")),
                ("num", json!(3)),
                ("nul", json!(null)),
                ("obj", json!({"a": 1})),
                ("boo", json!(true)),
            ],
        )
        .await;

    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, unbounded(), 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["nul", "boo", "num", "str", "obj"]);
}

#[tokio::test]
async fn test_fetch_page_orders_by_field_missing_first() {
    let store = MemoryStore::new();
    store
        .insert_many(
            "c",
            [
                ("a", json!({"score": 5})),
                ("b", json!({"other": 1})),
                ("c", json!({"score": 2})),
            ],
        )
        .await;

    let snapshots = store
        .fetch_page("c", page(OrderBy::field("score"), unbounded(), 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["b", "c", "a"]);
}

// ============================================================================
// Filters and limits
// ============================================================================

#[tokio::test]
async fn test_fetch_page_limit() {
    let store = MemoryStore::new();
    store
        .insert_many("c", (0..10).map(|i| (format!("k{i}"), i)))
        .await;

    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, unbounded(), 3))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["k0", "k1", "k2"]);
}

#[tokio::test]
async fn test_fetch_page_inclusive_bounds() {
    let store = MemoryStore::new();
    store
        .insert_many("c", (0..10).map(|i| (format!("k{i}"), i)))
        .await;

    let filter = QueryFilter::Range {
        start_at: Some(QueryBound::value(json!(3))),
        end_at: Some(json!(6)),
    };
    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, filter, 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["k3", "k4", "k5", "k6"]);
}

#[tokio::test]
async fn test_fetch_page_compound_start_bound() {
    let store = MemoryStore::new();
    store
        .insert_many("c", [("a", 5), ("b", 5), ("c", 5), ("d", 6)])
        .await;

    // Resume inside the run of fives, at "b" inclusively.
    let filter = QueryFilter::Range {
        start_at: Some(QueryBound::resuming(json!(5), "b")),
        end_at: None,
    };
    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, filter, 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["b", "c", "d"]);
}

#[tokio::test]
async fn test_fetch_page_equal_to() {
    let store = MemoryStore::new();
    store
        .insert_many("c", [("a", 5), ("b", 7), ("c", 5), ("d", 5)])
        .await;

    let filter = QueryFilter::EqualTo {
        value: json!(5),
        resume_key: None,
    };
    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, filter, 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["a", "c", "d"]);
}

#[tokio::test]
async fn test_fetch_page_equal_to_with_resume_key() {
    let store = MemoryStore::new();
    store
        .insert_many("c", [("a", 5), ("b", 7), ("c", 5), ("d", 5)])
        .await;

    let filter = QueryFilter::EqualTo {
        value: json!(5),
        resume_key: Some("c".to_string()),
    };
    let snapshots = store
        .fetch_page("c", page(OrderBy::Value, filter, 10))
        .await
        .unwrap();
    assert_eq!(keys(&snapshots), vec!["c", "d"]);
}

#[tokio::test]
async fn test_fetch_page_unknown_path_is_empty() {
    let store = MemoryStore::new();
    let snapshots = store
        .fetch_page("nowhere", page(OrderBy::Key, unbounded(), 10))
        .await
        .unwrap();
    assert!(snapshots.is_empty());
}

#[tokio::test]
async fn test_clone_shares_collections() {
    let store = MemoryStore::new();
    let alias = store.clone();
    alias.insert("c", "k", 1).await;
    assert_eq!(store.len("c").await, 1);
}
