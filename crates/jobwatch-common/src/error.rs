//! Error types for Jobwatch

use thiserror::Error;

/// Result type alias for Jobwatch operations
pub type Result<T> = std::result::Result<T, JobwatchError>;

/// Main error type for Jobwatch
#[derive(Error, Debug)]
pub enum JobwatchError {
    /// An incoming job is missing a required field or carries a blank one.
    /// `index` is the position of the offending item in its batch.
    #[error("Invalid job at position {index}: field '{field}' {reason}")]
    Validation {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid job status: '{0}'. Expected one of: new, seen, modified, removed")]
    InvalidStatus(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JobwatchError {
    /// Create a validation error for a batch item
    pub fn validation(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            index,
            field,
            reason: reason.into(),
        }
    }
}
