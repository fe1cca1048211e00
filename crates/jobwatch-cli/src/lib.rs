//! Jobwatch engine and CLI
//!
//! Tracks job postings over time: which ones are new, which were seen again,
//! which changed and which disappeared.
//!
//! # Overview
//!
//! - **Store**: durable job records plus an append-only transition log (`store`)
//! - **Tracker**: per-company diff of an incoming batch (`tracker`)
//! - **Reporting**: statistics, markdown reports, CSV export (`report`)
//! - **CLI**: `jobwatch ingest`, `stats`, `jobs`, `report`, `export`, `cleanup`, ...
//!
//! # Example
//!
//! ```no_run
//! use jobwatch_cli::clock::SystemClock;
//! use jobwatch_cli::store::{JobStore, SqliteJobStore};
//! use jobwatch_cli::tracker::HistoryTracker;
//! use jobwatch_common::JobPosting;
//! use std::sync::Arc;
//!
//! # async fn demo() -> jobwatch_cli::Result<()> {
//! let store: Arc<dyn JobStore> = Arc::new(SqliteJobStore::in_memory(Arc::new(SystemClock))?);
//! let tracker = HistoryTracker::new(store);
//! let summary = tracker
//!     .process_batch("Acme", vec![JobPosting::new("Data Analyst", "https://x/1")])
//!     .await?;
//! assert_eq!(summary.new_jobs, 1);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use report::ReportingFacade;
pub use store::{JobStore, SqliteJobStore};
pub use tracker::HistoryTracker;

use clap::{Parser, Subcommand};
use jobwatch_common::JobStatus;
use std::path::PathBuf;

/// Jobwatch - job posting history tracker
#[derive(Parser, Debug)]
#[command(name = "jobwatch")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Job database file
    #[arg(long, env = "JOBWATCH_DATABASE_PATH", global = true)]
    pub database: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a batch of postings for one company
    Ingest {
        /// Company the batch belongs to
        #[arg(short, long)]
        company: String,

        /// JSON file holding an array of jobs ("-" reads stdin)
        #[arg(short, long, default_value = "-")]
        file: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show store statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tracked jobs
    Jobs {
        /// Only jobs in this status (new, seen, modified, removed)
        #[arg(short, long)]
        status: Option<JobStatus>,

        /// Only jobs of this company
        #[arg(short, long)]
        company: Option<String>,

        /// Maximum number of jobs to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List companies with tracked jobs
    Companies,

    /// Show counts for one company
    Company {
        /// Company name
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the status history of one job
    History {
        /// Job id (as shown by `jobwatch jobs`)
        job_id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the markdown status report
    Report {
        /// Write the report to this file instead of stdout
        #[arg(short, long, conflicts_with = "save")]
        output: Option<PathBuf>,

        /// Save as daily_report_<date>.md in the report directory
        #[arg(long)]
        save: bool,
    },

    /// Export jobs to CSV
    Export {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Only jobs in this status
        #[arg(short, long)]
        status: Option<JobStatus>,

        /// Only jobs of this company
        #[arg(short, long)]
        company: Option<String>,
    },

    /// Delete removed jobs older than the retention window
    Cleanup {
        /// Retention window in days (defaults to JOBWATCH_RETENTION_DAYS or 90)
        #[arg(short, long)]
        days: Option<u32>,
    },
}
