//! Durable job records and their transition log
//!
//! [`JobStore`] is the contract the tracker and the reporting layer depend on;
//! [`SqliteJobStore`] is the SQLite implementation.
//!
//! Every method is one self-contained unit of work: it takes the connection,
//! runs (and for writes, commits) its statements, and releases it. Nothing
//! holds the store across a batch, so two batches for the **same** company must
//! not run concurrently. Batches for different companies may.
//!
//! Failure handling differs by path:
//!
//! - write paths (`existing_for_company`, `insert`, `update`, `mark_removed`,
//!   `cleanup`) log and return the error;
//! - read paths (statistics and listings) log and fall back to an empty or
//!   default value.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteJobStore;

use crate::error::Result;
use async_trait::async_trait;
use jobwatch_common::types::Statistics;
use jobwatch_common::{JobPosting, JobRecord, JobStatus, TransitionEntry};
use std::collections::{HashMap, HashSet};

/// Trait for job record storage (dependency injection)
#[async_trait]
pub trait JobStore: Send + Sync {
    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    /// Every record owned by `company`, keyed by job id, in any status
    /// (removed ones included, so they can be resurrected).
    async fn existing_for_company(&self, company: &str) -> Result<HashMap<String, JobRecord>>;

    /// Create a record with status `new` and log the `new` transition.
    /// Returns the derived job id.
    async fn insert(&self, company: &str, job: &JobPosting) -> Result<String>;

    /// Refresh content, bump `date_last_seen` and set `status`. A transition is
    /// logged only when `status` differs from the stored one.
    async fn update(&self, job_id: &str, job: &JobPosting, status: JobStatus) -> Result<()>;

    /// Mark every active record of `company` not in `current_ids` as removed.
    /// Already-removed records are left alone. Returns how many changed.
    async fn mark_removed(&self, company: &str, current_ids: &HashSet<String>) -> Result<usize>;

    /// Delete removed records last seen more than `retention_days` ago.
    /// Returns the number of deleted records.
    async fn cleanup(&self, retention_days: u32) -> Result<usize>;

    // ------------------------------------------------------------------
    // Read path (degrades to empty results on failure)
    // ------------------------------------------------------------------

    async fn statistics(&self) -> Statistics;

    /// Records in `status`, most recently seen first
    async fn jobs_by_status(&self, status: JobStatus, limit: usize) -> Vec<JobRecord>;

    /// All records matching the optional filters, most recently seen first
    async fn all_jobs(&self, company: Option<&str>, status: Option<JobStatus>) -> Vec<JobRecord>;

    /// Distinct company names, alphabetical
    async fn all_companies(&self) -> Vec<String>;

    async fn get(&self, job_id: &str) -> Option<JobRecord>;

    /// Transition log of one job, oldest first
    async fn history_for(&self, job_id: &str) -> Vec<TransitionEntry>;

    /// Total rows in the transition log
    async fn transition_count(&self) -> u64;
}
