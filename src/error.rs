//! Custom error types for budget-pace
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Analytics never fail for lack of history;
//! they return `Option` or a status value instead of an error.

use thiserror::Error;

/// The main error type for budget-pace operations
#[derive(Error, Debug)]
pub enum PaceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Transaction belongs to an archived budget month
    #[error("Transaction is locked: {0}")]
    Locked(String),

    /// Import errors (the whole import is rejected)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Session has not been set up yet
    #[error("No budget found. Run 'pace init' first.")]
    NotInitialized,
}

impl PaceError {
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

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from touching an archived transaction
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for PaceError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for budget-pace operations
pub type PaceResult<T> = Result<T, PaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PaceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PaceError::category_not_found("Groceries");
        assert_eq!(err.to_string(), "Category not found: Groceries");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_error() {
        let err = PaceError::Duplicate {
            entity_type: "Category",
            identifier: "Rent".into(),
        };
        assert_eq!(err.to_string(), "Category already exists: Rent");
    }

    #[test]
    fn test_locked_error() {
        let err = PaceError::Locked("txn-1234 belongs to 2025-01".into());
        assert!(err.is_locked());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let pace_err: PaceError = io_err.into();
        assert!(matches!(pace_err, PaceError::Io(_)));
    }
}
