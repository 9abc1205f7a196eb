//! Cursor derivation between pages
//!
//! Range queries are inclusive, so each page re-returns the previous
//! page's last item as its first. The advancer drops that boundary
//! duplicate, derives the (order value, key) cursor the next page resumes
//! from, and decides whether a next page exists at all.

use crate::error::{Error, Result};
use crate::order::OrderBy;
use crate::range::Bounds;
use crate::types::{JsonValue, Snapshot};

/// Where the next page resumes.
///
/// `start_at` is the order value of the last item seen; `resume_key` is
/// that item's key, used as a compound tie-break so the store can resume
/// precisely inside a run of equal order values. A cursor with no
/// `resume_key` starts from the range's lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Key of the boundary item this cursor resumes past
    pub resume_key: Option<String>,
    /// Order value the next page starts at (`None` = unbounded low)
    pub start_at: Option<JsonValue>,
}

impl Cursor {
    /// Cursor for the first page of a range
    pub(crate) fn initial(bounds: &Bounds) -> Self {
        Self {
            resume_key: None,
            start_at: bounds.start_at.clone(),
        }
    }
}

/// Drop the boundary duplicate and derive the next page's cursor.
///
/// Returns the items that still need processing, together with the cursor
/// for the page after them — `None` when `page` was the last page: either
/// the store returned fewer items than requested (counted before
/// trimming), or nothing remained after the boundary item was dropped.
pub(crate) fn advance(
    page: Vec<Snapshot>,
    order_by: &OrderBy,
    starting_key: Option<&str>,
    page_size: usize,
) -> Result<(Vec<Snapshot>, Option<Cursor>)> {
    let fetched = page.len();
    let mut items = Vec::with_capacity(fetched);
    let mut next = None;

    for snapshot in page {
        if starting_key == Some(snapshot.key.as_str()) {
            continue;
        }
        let start_at = order_by
            .order_value(&snapshot)
            .ok_or_else(|| Error::missing_order_value(&snapshot.key))?;
        next = Some(Cursor {
            resume_key: Some(snapshot.key.clone()),
            start_at: Some(start_at),
        });
        items.push(snapshot);
    }

    if fetched < page_size || items.is_empty() {
        return Ok((items, None));
    }
    Ok((items, next))
}
