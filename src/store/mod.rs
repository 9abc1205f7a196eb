//! The ordered-store collaborator interface
//!
//! # Overview
//!
//! The store module is the crate's only external boundary. A backend
//! implements [`OrderedStore`] by executing the [`PageQuery`] descriptions
//! the pagination driver assembles: bounded ascending range scans, exact
//! order-value matches, and direct point lookups by key. Connection
//! handling, authentication, and the wire protocol are entirely the
//! backend's concern.
//!
//! [`MemoryStore`] is the built-in reference backend used throughout the
//! test suite.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::order::OrderBy;
use crate::types::{JsonValue, Snapshot};
use async_trait::async_trait;

// ============================================================================
// Query description
// ============================================================================

/// An order-value bound, optionally compounded with a tie-break key.
///
/// With a `resume_key`, the bound reads "items whose order value is greater
/// than `value`, or equal to it with a key at or after `resume_key`" — the
/// compound form that lets a store resume precisely inside a run of items
/// sharing an order value.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBound {
    /// The order value the bound compares against
    pub value: JsonValue,
    /// Tie-break key resuming inside a run of equal order values
    pub resume_key: Option<String>,
}

impl QueryBound {
    /// A plain bound on the order value alone
    pub fn value(value: JsonValue) -> Self {
        Self {
            value,
            resume_key: None,
        }
    }

    /// A bound compounded with a tie-break key
    pub fn resuming(value: JsonValue, key: impl Into<String>) -> Self {
        Self {
            value,
            resume_key: Some(key.into()),
        }
    }
}

/// Which items of an ordered collection a page query matches
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// Items between two inclusive order-value bounds
    Range {
        /// Inclusive lower bound (`None` = unbounded low)
        start_at: Option<QueryBound>,
        /// Inclusive upper bound (`None` = unbounded high)
        end_at: Option<JsonValue>,
    },
    /// Items whose order value equals `value` exactly
    EqualTo {
        /// The order value to match
        value: JsonValue,
        /// Tie-break key resuming inside the matching run
        resume_key: Option<String>,
    },
}

/// A bounded ascending page query against an ordered collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    /// Ordering the collection is scanned in
    pub order_by: OrderBy,
    /// Which items the query matches
    pub filter: QueryFilter,
    /// Maximum number of items to return
    pub limit_to_first: usize,
}

// ============================================================================
// OrderedStore
// ============================================================================

/// A remote keyed store that supports bounded ascending range queries.
///
/// Implementations must return snapshots ascending by (order value, key)
/// under the queried [`OrderBy`] mode, with bounds applied inclusively,
/// following the value ordering documented at
/// [`compare_order_values`](crate::order::compare_order_values). Every
/// snapshot a backend returns must yield an order value under the queried
/// mode.
#[async_trait]
pub trait OrderedStore: Send + Sync {
    /// Run `query` against the collection at `path`.
    ///
    /// Returns at most `query.limit_to_first` snapshots in ascending
    /// order. An unknown `path` is an empty collection, not an error.
    async fn fetch_page(&self, path: &str, query: PageQuery) -> Result<Vec<Snapshot>>;

    /// Point lookup of a single item by key, or `None` if absent
    async fn fetch_child(&self, path: &str, key: &str) -> Result<Option<Snapshot>>;
}

#[cfg(test)]
mod tests;
