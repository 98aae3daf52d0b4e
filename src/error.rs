//! Custom error types for Tally
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::CategoryKind;

/// The main error type for Tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The store was used before `initialize` completed
    #[error("Storage is not initialized")]
    StorageNotReady,

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A category with the same name and type already exists
    #[error("Category already exists: {name} ({kind})")]
    DuplicateCategory { name: String, kind: CategoryKind },

    /// A category is still referenced by transactions or estimates
    #[error(
        "Category '{name}' is in use by {transactions} transaction(s) and {estimates} estimate(s)"
    )]
    CategoryInUse {
        name: String,
        transactions: usize,
        estimates: usize,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TallyError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Prefix a storage failure with what the caller was doing.
    ///
    /// Domain errors pass through untouched.
    pub fn context(self, action: &str) -> Self {
        match self {
            Self::Storage(msg) => Self::Storage(format!("{}: {}", action, msg)),
            Self::Io(msg) => Self::Io(format!("{}: {}", action, msg)),
            other => other,
        }
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Tally operations
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TallyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TallyError::category_not_found("Food");
        assert_eq!(err.to_string(), "Category not found: Food");
        assert!(matches!(err, TallyError::NotFound { .. }));
    }

    #[test]
    fn test_category_in_use_error() {
        let err = TallyError::CategoryInUse {
            name: "Food".into(),
            transactions: 2,
            estimates: 1,
        };
        assert_eq!(
            err.to_string(),
            "Category 'Food' is in use by 2 transaction(s) and 1 estimate(s)"
        );
    }

    #[test]
    fn test_duplicate_category_error() {
        let err = TallyError::DuplicateCategory {
            name: "Food".into(),
            kind: CategoryKind::Expense,
        };
        assert_eq!(err.to_string(), "Category already exists: Food (expense)");
    }

    #[test]
    fn test_context_only_wraps_storage_failures() {
        let err = TallyError::Storage("disk full".into()).context("Failed to add transaction");
        assert_eq!(
            err.to_string(),
            "Storage error: Failed to add transaction: disk full"
        );

        let err = TallyError::StorageNotReady.context("Failed to add transaction");
        assert!(matches!(err, TallyError::StorageNotReady));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tally_err: TallyError = io_err.into();
        assert!(matches!(tally_err, TallyError::Io(_)));
    }
}
