//! # pagewalk
//!
//! Exhaustive cursor pagination over remote ordered collections.
//!
//! A walk drains every item of a keyed, remotely-stored collection that
//! falls inside an optional range (or exact-match) filter, using only
//! bounded-size range queries, and returns a flat, order-preserving
//! sequence of (optionally transformed) results.
//!
//! ## Features
//!
//! - **Three ordering modes**: by key, by whole value, or by a named
//!   (possibly nested) field — one driver, three adapters
//! - **Compound cursors**: a (order value, key) tie-break resumes
//!   precisely inside runs of items sharing an order value
//! - **Transform pipeline**: per-page concurrent transformation, or
//!   strictly serial iteration with cooperative early exit
//! - **Pluggable stores**: any backend that can answer bounded ascending
//!   range queries implements [`OrderedStore`]; [`MemoryStore`] ships as
//!   the reference backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{by_field, MemoryStore, Range, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = MemoryStore::new();
//!     store.insert("users", "alice", serde_json::json!({"score": 10})).await;
//!     store.insert("users", "bob", serde_json::json!({"score": 25})).await;
//!
//!     // Every user with score in [10, 20], fetched 100 at a time.
//!     let range = Range::all().with_start_at(10).with_end_at(20);
//!     let users = by_field(&store, "users", "score", 100, range).await?;
//!
//!     for user in users {
//!         println!("{}: {}", user.key, user.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Entry points (walk)                    │
//! │  by_key / by_value / by_field  ×  plain / transformed /     │
//! │                                   for_each                  │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬─────────────┬────┴─────────┬────────────────────┐
//! │  Range   │   Driver    │   Cursor     │     Pipeline       │
//! ├──────────┼─────────────┼──────────────┼────────────────────┤
//! │ start_at │ validate    │ trim bound-  │ concurrent join    │
//! │ end_at   │ fetch pages │ ary, derive  │ serial + early     │
//! │ equal_to │ sequentially│ next cursor  │ exit (ControlFlow) │
//! └──────────┴─────────────┴──────────────┴────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │              OrderedStore (external collaborator)           │
//! │   bounded ascending page queries · point lookups by key     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Ordering modes and the order-value contract
pub mod order;

/// Range filters and their canonical form
pub mod range;

/// The ordered-store collaborator interface
pub mod store;

/// Pagination driver and public entry points
pub mod walk;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ResultExt};
pub use order::OrderBy;
pub use range::{Bounds, Range};
pub use store::{MemoryStore, OrderedStore, PageQuery, QueryBound, QueryFilter};
pub use types::{EntryPoint, JsonObject, JsonValue, Snapshot};
pub use walk::{
    by_field, by_field_for_each, by_field_transformed, by_key, by_key_for_each,
    by_key_transformed, by_value, by_value_for_each, by_value_transformed, Cursor,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
