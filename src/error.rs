//! Custom error types for BudgetIQ
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The single message shown for every sign-in failure
pub const LOGIN_FAILED_MESSAGE: &str = "Failed to log in. Please check your credentials.";

/// The main error type for BudgetIQ operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Authentication errors
    #[error("{0}")]
    Auth(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Live subscription errors
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgetError {
    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// The generic sign-in failure, regardless of cause
    pub fn login_failed() -> Self {
        Self::Auth(LOGIN_FAILED_MESSAGE.to_string())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetIQ operations
pub type BudgetResult<T> = Result<T, BudgetError>;
