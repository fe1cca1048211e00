//! Configuration management for Jobwatch
//!
//! Handles the database location, retention window and report directory.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Days a removed job is kept before retention cleanup may delete it.
pub const DEFAULT_RETENTION_DAYS: u32 = 90;

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "job_history.db";

/// Jobwatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database holding job records and their transition log
    pub database_path: PathBuf,

    /// Retention window for removed jobs, in days
    pub retention_days: u32,

    /// Directory where saved reports are written
    pub report_dir: PathBuf,
}

impl Config {
    /// Create a config with default values
    pub fn new() -> Self {
        let database_path = dirs::data_dir()
            .map(|dir| dir.join("jobwatch"))
            .unwrap_or_else(|| PathBuf::from("data"))
            .join(DATABASE_FILE_NAME);

        Self {
            database_path,
            retention_days: DEFAULT_RETENTION_DAYS,
            report_dir: PathBuf::from("."),
        }
    }

    /// Load config from environment variables (after reading `.env`, if any)
    ///
    /// - `JOBWATCH_DATABASE_PATH`
    /// - `JOBWATCH_RETENTION_DAYS`
    /// - `JOBWATCH_REPORT_DIR`
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();

        let mut config = Self::new();

        if let Ok(path) = std::env::var("JOBWATCH_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Ok(days) = std::env::var("JOBWATCH_RETENTION_DAYS") {
            config.retention_days = parse_retention_days(&days)?;
        }

        if let Ok(dir) = std::env::var("JOBWATCH_REPORT_DIR") {
            config.report_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Override the database path (from `--database`)
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_retention_days(value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        CliError::config(format!(
            "JOBWATCH_RETENTION_DAYS must be a whole number of days, got '{}'",
            value
        ))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.retention_days, DEFAULT_RETENTION_DAYS);
        assert!(config.database_path.ends_with(DATABASE_FILE_NAME));
        assert_eq!(config.report_dir, PathBuf::from("."));
    }

    #[test]
    fn test_database_override() {
        let config = Config::new().with_database_path(Some(PathBuf::from("/tmp/jobs.db")));
        assert_eq!(config.database_path, PathBuf::from("/tmp/jobs.db"));

        let config = Config::new().with_database_path(None);
        assert!(config.database_path.ends_with(DATABASE_FILE_NAME));
    }

    #[test]
    fn test_parse_retention_days() {
        assert_eq!(parse_retention_days("30").unwrap(), 30);
        assert_eq!(parse_retention_days(" 7 ").unwrap(), 7);
        assert!(parse_retention_days("-1").is_err());
        assert!(parse_retention_days("soon").is_err());
    }
}
