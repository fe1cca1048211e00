//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function. Commands share an
//! [`Engine`], built once per invocation from the configuration.

pub mod cleanup;
pub mod companies;
pub mod company;
pub mod export;
pub mod history;
pub mod ingest;
pub mod jobs;
pub mod report;
pub mod stats;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::report::ReportingFacade;
use crate::store::{JobStore, SqliteJobStore};
use crate::tracker::HistoryTracker;
use colored::{ColoredString, Colorize};
use jobwatch_common::JobStatus;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// The store, tracker and reporting facade wired for one command
pub struct Engine {
    pub config: Config,
    pub store: Arc<dyn JobStore>,
    pub clock: Arc<dyn Clock>,
}

impl Engine {
    /// Load configuration and open the job database. `database` overrides the
    /// configured path.
    pub fn open(database: Option<PathBuf>) -> Result<Self> {
        let config = Config::from_env()?.with_database_path(database);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        debug!(path = %config.database_path.display(), "Opening job database");
        let store = SqliteJobStore::open(&config.database_path, clock.clone())?;

        Ok(Self {
            config,
            store: Arc::new(store),
            clock,
        })
    }

    pub fn tracker(&self) -> HistoryTracker {
        HistoryTracker::new(self.store.clone())
    }

    pub fn reporting(&self) -> ReportingFacade {
        ReportingFacade::new(self.store.clone(), self.clock.clone())
    }
}

/// Status name colored by lifecycle state
pub(crate) fn paint_status(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::New => status.as_str().green(),
        JobStatus::Seen => status.as_str().normal(),
        JobStatus::Modified => status.as_str().yellow(),
        JobStatus::Removed => status.as_str().red(),
    }
}

/// Shorten `value` to at most `max` characters, marking the cut with "..."
pub(crate) fn truncate_string(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
