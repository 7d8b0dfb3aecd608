//! Custom error types for BudgetWise export
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BudgetWise operations
#[derive(Error, Debug)]
pub enum BudgetWiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for export options
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record source errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Rendering or writing the artifact failed
    #[error("Export error: {0}")]
    Export(String),

    /// No share capability on this device
    #[error("Sharing is not available on this device")]
    SharingUnavailable,

    /// No email composition capability on this device
    #[error("Email is not available on this device")]
    EmailUnavailable,

    /// The share capability exists but failed
    #[error("Share failed: {0}")]
    Share(String),

    /// The email capability exists but failed
    #[error("Email failed: {0}")]
    Email(String),
}

impl BudgetWiseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if a delivery capability was missing (as opposed to failing)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::SharingUnavailable | Self::EmailUnavailable)
    }
}

impl From<std::io::Error> for BudgetWiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetWiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetWise operations
pub type BudgetWiseResult<T> = Result<T, BudgetWiseError>;
