//! Error types for pagewalk
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::EntryPoint;
use thiserror::Error;

/// The main error type for pagewalk
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("{entry_point}: max_page_size must be greater than 1 (provided {provided})")]
    InvalidPageSize {
        entry_point: EntryPoint,
        provided: usize,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Store error: {message}")]
    Store { message: String },

    // ============================================================================
    // Internal Consistency Errors
    // ============================================================================
    #[error("No order value for item '{key}' returned by the store")]
    MissingOrderValue { key: String },

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to decode snapshot value: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid-page-size error attributed to a public entry point
    pub fn invalid_page_size(entry_point: EntryPoint, provided: usize) -> Self {
        Self::InvalidPageSize {
            entry_point,
            provided,
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a missing-order-value error for the given item key
    pub fn missing_order_value(key: impl Into<String>) -> Self {
        Self::MissingOrderValue { key: key.into() }
    }
}

/// Result type alias for pagewalk
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_page_size(EntryPoint::ByKey, 1);
        assert_eq!(
            err.to_string(),
            "by_key: max_page_size must be greater than 1 (provided 1)"
        );

        let err = Error::store("connection reset");
        assert_eq!(err.to_string(), "Store error: connection reset");

        let err = Error::missing_order_value("REF_3");
        assert_eq!(
            err.to_string(),
            "No order value for item 'REF_3' returned by the store"
        );
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::store("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Store error: inner"));
    }

    #[test]
    fn test_result_with_context() {
        let result: Result<()> = Err(Error::store("inner"));
        let err = result.with_context(|| "lazy".to_string()).unwrap_err();
        assert!(err.to_string().starts_with("lazy: "));
    }
}
