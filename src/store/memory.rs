//! In-memory ordered store
//!
//! Reference [`OrderedStore`] backend over path-scoped B-tree maps. It
//! executes page queries by materializing the collection in (order value,
//! key) order and applying the filter, which keeps it an executable
//! description of the ordering contract real backends must honor. Used
//! throughout the test suite; cloning shares the underlying collections.

use super::{OrderedStore, PageQuery, QueryBound, QueryFilter};
use crate::error::Result;
use crate::order::{compare_order_values, OrderBy};
use crate::types::{JsonValue, Snapshot};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory ordered store keyed by collection path
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, BTreeMap<String, JsonValue>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one item, returning the previous value if any
    pub async fn insert(
        &self,
        path: &str,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Option<JsonValue> {
        let mut collections = self.collections.write().await;
        collections
            .entry(path.to_string())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Bulk-load items into a collection
    pub async fn insert_many<K, V>(&self, path: &str, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<JsonValue>,
    {
        let mut collections = self.collections.write().await;
        let tree = collections.entry(path.to_string()).or_default();
        for (key, value) in entries {
            tree.insert(key.into(), value.into());
        }
    }

    /// Remove one item, returning its value if it existed
    pub async fn remove(&self, path: &str, key: &str) -> Option<JsonValue> {
        let mut collections = self.collections.write().await;
        collections.get_mut(path)?.remove(key)
    }

    /// Number of items in a collection
    pub async fn len(&self, path: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(path).map_or(0, BTreeMap::len)
    }

    /// Whether a collection has no items
    pub async fn is_empty(&self, path: &str) -> bool {
        self.len(path).await == 0
    }
}

#[async_trait]
impl OrderedStore for MemoryStore {
    async fn fetch_page(&self, path: &str, query: PageQuery) -> Result<Vec<Snapshot>> {
        let collections = self.collections.read().await;
        let Some(tree) = collections.get(path) else {
            return Ok(Vec::new());
        };

        let snapshots = sorted_rows(tree, &query.order_by)
            .into_iter()
            .filter(|(order_value, snapshot)| {
                filter_matches(&query.filter, order_value, &snapshot.key)
            })
            .map(|(_, snapshot)| snapshot)
            .take(query.limit_to_first)
            .collect();
        Ok(snapshots)
    }

    async fn fetch_child(&self, path: &str, key: &str) -> Result<Option<Snapshot>> {
        let collections = self.collections.read().await;
        let found = collections
            .get(path)
            .and_then(|tree| tree.get(key))
            .map(|value| Snapshot::new(key, value.clone()));
        Ok(found)
    }
}

/// Materialize a collection ascending by (order value, key)
fn sorted_rows(tree: &BTreeMap<String, JsonValue>, order_by: &OrderBy) -> Vec<(JsonValue, Snapshot)> {
    let mut rows: Vec<(JsonValue, Snapshot)> = tree
        .iter()
        .map(|(key, value)| {
            let snapshot = Snapshot::new(key.clone(), value.clone());
            let order_value = order_by.order_value(&snapshot).unwrap_or(JsonValue::Null);
            (order_value, snapshot)
        })
        .collect();
    rows.sort_by(|a, b| {
        compare_order_values(&a.0, &b.0).then_with(|| a.1.key.cmp(&b.1.key))
    });
    rows
}

fn filter_matches(filter: &QueryFilter, order_value: &JsonValue, key: &str) -> bool {
    match filter {
        QueryFilter::Range { start_at, end_at } => {
            let after_start = start_at
                .as_ref()
                .map_or(true, |bound| bound_admits(bound, order_value, key));
            let before_end = end_at.as_ref().map_or(true, |end| {
                compare_order_values(order_value, end) != Ordering::Greater
            });
            after_start && before_end
        }
        QueryFilter::EqualTo { value, resume_key } => {
            compare_order_values(order_value, value) == Ordering::Equal
                && resume_key.as_deref().map_or(true, |resume| key >= resume)
        }
    }
}

/// Inclusive compound lower bound: past the value, or tied with a key at or
/// after the resume key.
fn bound_admits(bound: &QueryBound, order_value: &JsonValue, key: &str) -> bool {
    match compare_order_values(order_value, &bound.value) {
        Ordering::Greater => true,
        Ordering::Equal => bound.resume_key.as_deref().map_or(true, |resume| key >= resume),
        Ordering::Less => false,
    }
}
