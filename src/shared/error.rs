//! Shared Error Types
//!
//! This module defines the errors raised while turning untrusted request
//! bodies into validated inputs. The backend converts them into
//! `422 invalidInput` responses.
//!
//! # Error Categories
//!
//! - `SerializationError` - the body was not valid JSON for the expected shape
//! - `ValidationError` - a field was missing, blank or malformed
//!
//! # Usage
//!
//! ```rust
//! use bookshelf::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "is required");
//! assert_eq!(error.to_string(), "Validation error in field 'username': is required");
//! ```
use thiserror::Error;

/// Request validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field
    pub fn missing(field: impl Into<String>) -> Self {
        Self::validation(field, "is required")
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Return the trimmed value of a required text field
///
/// Absent and whitespace-only values are both rejected.
pub fn require_text(field: &str, value: Option<String>) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(SharedError::missing(field)),
    }
}
