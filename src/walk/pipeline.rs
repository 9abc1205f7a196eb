//! Per-page transformation pipeline
//!
//! Two modes: transform every item of a page concurrently and join before
//! the next fetch, or visit items strictly in order with cooperative early
//! exit. Boundary duplicates are trimmed before a page reaches either
//! mode, so a transformer sees each distinct item exactly once.

use crate::error::Result;
use crate::types::Snapshot;
use futures::future::try_join_all;
use std::future::Future;
use std::ops::ControlFlow;

/// Transform every snapshot of a page concurrently, preserving order.
///
/// All transformations of the page are started together; the first error
/// aborts the page and propagates.
pub(crate) async fn transform_page<T, F, Fut>(page: Vec<Snapshot>, transformer: &F) -> Result<Vec<T>>
where
    F: Fn(Snapshot) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    try_join_all(page.into_iter().map(transformer)).await
}

/// Visit each snapshot of a page strictly in order.
///
/// Stops at the first `ControlFlow::Break` the iterator returns; no
/// further items of the page are visited.
pub(crate) async fn for_each_page<F, Fut>(
    page: Vec<Snapshot>,
    iterator: &mut F,
) -> Result<ControlFlow<()>>
where
    F: FnMut(Snapshot) -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    for snapshot in page {
        if iterator(snapshot).await?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}
