//! Range filters and their canonical form
//!
//! Callers restrict a walk with a [`Range`]: an optional lower bound, an
//! optional upper bound, or an exact-match value. Before any page is
//! fetched the range is normalized once into [`Bounds`], the canonical
//! `{start, end}` pair the driver works with.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

// ============================================================================
// Range
// ============================================================================

/// Caller-specified bounds restricting which items are paginated.
///
/// `equal_to` is a pure alias for `start_at == end_at == value` and wins
/// over the other fields if both forms are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    /// Inclusive lower bound on the order value (`None` = unbounded low)
    pub start_at: Option<JsonValue>,
    /// Inclusive upper bound on the order value (`None` = unbounded high)
    pub end_at: Option<JsonValue>,
    /// Exact-match order value; overrides `start_at`/`end_at`
    pub equal_to: Option<JsonValue>,
}

impl Range {
    /// The unbounded range: every item of the collection
    pub fn all() -> Self {
        Self::default()
    }

    /// Range matching items whose order value equals `value` exactly
    pub fn equal_to(value: impl Into<JsonValue>) -> Self {
        Self {
            equal_to: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set the inclusive lower bound
    #[must_use]
    pub fn with_start_at(mut self, value: impl Into<JsonValue>) -> Self {
        self.start_at = Some(value.into());
        self
    }

    /// Set the inclusive upper bound
    #[must_use]
    pub fn with_end_at(mut self, value: impl Into<JsonValue>) -> Self {
        self.end_at = Some(value.into());
        self
    }

    /// Normalize into the canonical `{start, end}` pair
    pub fn bounds(&self) -> Bounds {
        if let Some(value) = &self.equal_to {
            return Bounds {
                start_at: Some(value.clone()),
                end_at: Some(value.clone()),
            };
        }
        Bounds {
            start_at: self.start_at.clone(),
            end_at: self.end_at.clone(),
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Canonical form of a [`Range`]: inclusive bounds, `None` for unbounded
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound (`None` = unbounded low)
    pub start_at: Option<JsonValue>,
    /// Inclusive upper bound (`None` = unbounded high)
    pub end_at: Option<JsonValue>,
}
