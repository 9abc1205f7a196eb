//! Pagination driver and public entry points
//!
//! # Overview
//!
//! One walk drains everything a range matches, page by page: validate the
//! page size, normalize the range once, then repeatedly fetch a bounded
//! page, trim the boundary duplicate, hand the new items to the transform
//! pipeline, and derive the next page's cursor from the last item seen.
//! Pages are fetched strictly sequentially — each page's query depends on
//! the previous page's last item — while items within a page transform
//! concurrently (or serially, in the cancellable `for_each` variants).
//!
//! The nine entry points are the three ordering modes crossed with the
//! three consumption styles:
//!
//! | ordering | full items | transformed | early exit |
//! |----------|------------|-------------|------------|
//! | key      | [`by_key`] | [`by_key_transformed`] | [`by_key_for_each`] |
//! | value    | [`by_value`] | [`by_value_transformed`] | [`by_value_for_each`] |
//! | field    | [`by_field`] | [`by_field_transformed`] | [`by_field_for_each`] |
//!
//! A fetch or transform error aborts the whole call with nothing returned;
//! retrying is the caller's concern.

mod cursor;
mod pipeline;

pub use cursor::Cursor;

use crate::error::{Error, Result};
use crate::order::OrderBy;
use crate::range::{Bounds, Range};
use crate::store::{OrderedStore, PageQuery, QueryBound, QueryFilter};
use crate::types::{EntryPoint, Snapshot};
use std::future::Future;
use std::ops::ControlFlow;
use tracing::{debug, warn};

// ============================================================================
// Entry points: order by key
// ============================================================================

/// Every item of `path` inside `range`, ordered by key
pub async fn by_key<S>(
    store: &S,
    path: &str,
    max_page_size: usize,
    range: Range,
) -> Result<Vec<Snapshot>>
where
    S: OrderedStore + ?Sized,
{
    collect(store, path, OrderBy::Key, max_page_size, range, EntryPoint::ByKey).await
}

/// Every item of `path` inside `range`, ordered by key, passed through
/// `transformer`
pub async fn by_key_transformed<S, T, F, Fut>(
    store: &S,
    path: &str,
    max_page_size: usize,
    transformer: F,
    range: Range,
) -> Result<Vec<T>>
where
    S: OrderedStore + ?Sized,
    F: Fn(Snapshot) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    transformed(
        store,
        path,
        OrderBy::Key,
        max_page_size,
        transformer,
        range,
        EntryPoint::ByKeyTransformed,
    )
    .await
}

/// Visit every item of `path` inside `range` in key order, stopping early
/// when `iterator` returns `ControlFlow::Break`. Returns whether the walk
/// was stopped.
pub async fn by_key_for_each<S, F, Fut>(
    store: &S,
    path: &str,
    max_page_size: usize,
    iterator: F,
    range: Range,
) -> Result<bool>
where
    S: OrderedStore + ?Sized,
    F: FnMut(Snapshot) -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    for_each(
        store,
        path,
        OrderBy::Key,
        max_page_size,
        iterator,
        range,
        EntryPoint::ByKeyForEach,
    )
    .await
}

// ============================================================================
// Entry points: order by value
// ============================================================================

/// Every item of `path` inside `range`, ordered by whole-item value
pub async fn by_value<S>(
    store: &S,
    path: &str,
    max_page_size: usize,
    range: Range,
) -> Result<Vec<Snapshot>>
where
    S: OrderedStore + ?Sized,
{
    collect(store, path, OrderBy::Value, max_page_size, range, EntryPoint::ByValue).await
}

/// Every item of `path` inside `range`, ordered by whole-item value,
/// passed through `transformer`
pub async fn by_value_transformed<S, T, F, Fut>(
    store: &S,
    path: &str,
    max_page_size: usize,
    transformer: F,
    range: Range,
) -> Result<Vec<T>>
where
    S: OrderedStore + ?Sized,
    F: Fn(Snapshot) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    transformed(
        store,
        path,
        OrderBy::Value,
        max_page_size,
        transformer,
        range,
        EntryPoint::ByValueTransformed,
    )
    .await
}

/// Visit every item of `path` inside `range` in value order, stopping
/// early when `iterator` returns `ControlFlow::Break`. Returns whether
/// the walk was stopped.
pub async fn by_value_for_each<S, F, Fut>(
    store: &S,
    path: &str,
    max_page_size: usize,
    iterator: F,
    range: Range,
) -> Result<bool>
where
    S: OrderedStore + ?Sized,
    F: FnMut(Snapshot) -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    for_each(
        store,
        path,
        OrderBy::Value,
        max_page_size,
        iterator,
        range,
        EntryPoint::ByValueForEach,
    )
    .await
}

// ============================================================================
// Entry points: order by field
// ============================================================================

/// Every item of `path` inside `range`, ordered by the named field
pub async fn by_field<S>(
    store: &S,
    path: &str,
    field: &str,
    max_page_size: usize,
    range: Range,
) -> Result<Vec<Snapshot>>
where
    S: OrderedStore + ?Sized,
{
    collect(
        store,
        path,
        OrderBy::field(field),
        max_page_size,
        range,
        EntryPoint::ByField,
    )
    .await
}

/// Every item of `path` inside `range`, ordered by the named field,
/// passed through `transformer`
pub async fn by_field_transformed<S, T, F, Fut>(
    store: &S,
    path: &str,
    field: &str,
    max_page_size: usize,
    transformer: F,
    range: Range,
) -> Result<Vec<T>>
where
    S: OrderedStore + ?Sized,
    F: Fn(Snapshot) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    transformed(
        store,
        path,
        OrderBy::field(field),
        max_page_size,
        transformer,
        range,
        EntryPoint::ByFieldTransformed,
    )
    .await
}

/// Visit every item of `path` inside `range` in field order, stopping
/// early when `iterator` returns `ControlFlow::Break`. Returns whether
/// the walk was stopped.
pub async fn by_field_for_each<S, F, Fut>(
    store: &S,
    path: &str,
    field: &str,
    max_page_size: usize,
    iterator: F,
    range: Range,
) -> Result<bool>
where
    S: OrderedStore + ?Sized,
    F: FnMut(Snapshot) -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    for_each(
        store,
        path,
        OrderBy::field(field),
        max_page_size,
        iterator,
        range,
        EntryPoint::ByFieldForEach,
    )
    .await
}

// ============================================================================
// Drivers
// ============================================================================

async fn collect<S>(
    store: &S,
    path: &str,
    order_by: OrderBy,
    max_page_size: usize,
    range: Range,
    entry_point: EntryPoint,
) -> Result<Vec<Snapshot>>
where
    S: OrderedStore + ?Sized,
{
    transformed(
        store,
        path,
        order_by,
        max_page_size,
        |snapshot| async move { Ok(snapshot) },
        range,
        entry_point,
    )
    .await
}

async fn transformed<S, T, F, Fut>(
    store: &S,
    path: &str,
    order_by: OrderBy,
    max_page_size: usize,
    transformer: F,
    range: Range,
    entry_point: EntryPoint,
) -> Result<Vec<T>>
where
    S: OrderedStore + ?Sized,
    F: Fn(Snapshot) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut walker = Walker::new(store, path, order_by, max_page_size, range, entry_point)?;
    let mut results = Vec::new();
    while let Some(page) = walker.next_page().await? {
        results.extend(pipeline::transform_page(page, &transformer).await?);
    }
    debug!(
        "{entry_point}: walk of '{path}' complete, {} items in {} pages",
        results.len(),
        walker.pages_fetched
    );
    Ok(results)
}

async fn for_each<S, F, Fut>(
    store: &S,
    path: &str,
    order_by: OrderBy,
    max_page_size: usize,
    mut iterator: F,
    range: Range,
    entry_point: EntryPoint,
) -> Result<bool>
where
    S: OrderedStore + ?Sized,
    F: FnMut(Snapshot) -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    let mut walker = Walker::new(store, path, order_by, max_page_size, range, entry_point)?;
    let mut stopped = false;
    while !stopped {
        let Some(page) = walker.next_page().await? else {
            break;
        };
        stopped = pipeline::for_each_page(page, &mut iterator).await?.is_break();
    }
    debug!(
        "{entry_point}: walk of '{path}' {} after {} pages",
        if stopped { "stopped" } else { "complete" },
        walker.pages_fetched
    );
    Ok(stopped)
}

// ============================================================================
// Walker
// ============================================================================

enum WalkState {
    Pending(Cursor),
    Done,
}

/// Sequential page fetcher for one walk. Owns the cursor; created per
/// top-level call and discarded at completion.
struct Walker<'a, S: ?Sized> {
    store: &'a S,
    path: &'a str,
    order_by: OrderBy,
    bounds: Bounds,
    page_size: usize,
    state: WalkState,
    pages_fetched: usize,
}

impl<'a, S> Walker<'a, S>
where
    S: OrderedStore + ?Sized,
{
    fn new(
        store: &'a S,
        path: &'a str,
        order_by: OrderBy,
        max_page_size: usize,
        range: Range,
        entry_point: EntryPoint,
    ) -> Result<Self> {
        if max_page_size <= 1 {
            return Err(Error::invalid_page_size(entry_point, max_page_size));
        }
        if max_page_size == 2 {
            warn!(
                "{entry_point}: max_page_size of 2 is inefficient and nets a single new item per page"
            );
        }
        let bounds = range.bounds();
        let state = WalkState::Pending(Cursor::initial(&bounds));
        Ok(Self {
            store,
            path,
            order_by,
            bounds,
            page_size: max_page_size,
            state,
            pages_fetched: 0,
        })
    }

    /// Fetch the next page and return its not-yet-seen items, or `None`
    /// once the walk is exhausted.
    async fn next_page(&mut self) -> Result<Option<Vec<Snapshot>>> {
        let current = match &self.state {
            WalkState::Pending(cursor) => cursor.clone(),
            WalkState::Done => return Ok(None),
        };
        self.pages_fetched += 1;

        if let Some(key) = self.point_lookup_key(&current) {
            self.state = WalkState::Done;
            let found = self.store.fetch_child(self.path, &key).await?;
            debug!(
                "point lookup of '{key}' in '{}': {}",
                self.path,
                if found.is_some() { "found" } else { "absent" }
            );
            return Ok(Some(found.into_iter().collect()));
        }

        let query = self.build_query(&current);
        let page = self.store.fetch_page(self.path, query).await?;
        let fetched = page.len();
        let (items, next) = cursor::advance(
            page,
            &self.order_by,
            current.resume_key.as_deref(),
            self.page_size,
        )?;
        debug!(
            "page {} of '{}': {fetched} fetched, {} new",
            self.pages_fetched,
            self.path,
            items.len()
        );
        self.state = match next {
            Some(cursor) => WalkState::Pending(cursor),
            None => WalkState::Done,
        };
        Ok(Some(items))
    }

    /// Singleton key range on the first page collapses to a point lookup.
    ///
    /// Only the first page qualifies: once a resume key is pending the
    /// boundary item must be re-fetched and trimmed by the normal range
    /// path, or it would be returned twice.
    fn point_lookup_key(&self, cursor: &Cursor) -> Option<String> {
        if self.order_by != OrderBy::Key || cursor.resume_key.is_some() {
            return None;
        }
        let end = self.bounds.end_at.as_ref()?;
        if cursor.start_at.as_ref() != Some(end) {
            return None;
        }
        end.as_str().map(str::to_owned)
    }

    fn build_query(&self, cursor: &Cursor) -> PageQuery {
        let filter = match &self.order_by {
            OrderBy::Key => QueryFilter::Range {
                start_at: cursor.start_at.clone().map(QueryBound::value),
                end_at: self.bounds.end_at.clone(),
            },
            OrderBy::Value | OrderBy::Field(_) => self.value_filter(cursor),
        };
        PageQuery {
            order_by: self.order_by.clone(),
            filter,
            limit_to_first: self.page_size,
        }
    }

    /// Under value and field ordering a singleton range queries as an
    /// exact match, carrying the resume key as the compound tie-break on
    /// pages after the first. Equal endpoints make a start/end pair
    /// redundant.
    fn value_filter(&self, cursor: &Cursor) -> QueryFilter {
        if let Some(end) = &self.bounds.end_at {
            if cursor.start_at.as_ref() == Some(end) {
                return QueryFilter::EqualTo {
                    value: end.clone(),
                    resume_key: cursor.resume_key.clone(),
                };
            }
        }
        let start_at = cursor.start_at.clone().map(|value| QueryBound {
            value,
            resume_key: cursor.resume_key.clone(),
        });
        QueryFilter::Range {
            start_at,
            end_at: self.bounds.end_at.clone(),
        }
    }
}
