//! Error types for the Jobwatch engine and CLI
//!
//! Messages are user-facing: they say what went wrong and, where there is one,
//! what to do about it.

use jobwatch_common::JobwatchError;
use thiserror::Error;

/// Result type alias for engine and CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Input batch failed validation; nothing was written
    #[error("Rejected batch: {0}")]
    Invalid(#[from] JobwatchError),

    /// SQLite operation failed
    #[error("Job store error: {0}. Check that the database file is writable and not corrupted.")]
    Store(#[from] rusqlite::Error),

    /// The single store connection was poisoned by a panicking writer
    #[error("Job store lock poisoned: {0}")]
    StoreLock(String),

    #[error("Job '{0}' not found in the store. Run 'jobwatch jobs' to list tracked jobs.")]
    JobNotFound(String),

    /// Incoming posting shares title and URL with a posting owned by another company
    #[error("Job '{job_id}' from '{incoming_company}' has the same title and URL as a job already tracked for '{existing_company}'")]
    IdentityCollision {
        job_id: String,
        existing_company: String,
        incoming_company: String,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}. Expected an array of job objects.")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}. Check your environment variables or .env file.")]
    Config(String),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn lock<E: std::fmt::Display>(err: E) -> Self {
        Self::StoreLock(err.to_string())
    }

    /// True for input errors that retrying cannot fix
    pub fn is_validation(&self) -> bool {
        matches!(self, CliError::Invalid(JobwatchError::Validation { .. }))
    }
}
