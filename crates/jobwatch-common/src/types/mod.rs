//! Common types used across Jobwatch

pub mod summary;

pub use summary::{BatchSummary, CompanyPerformance, Statistics, StatusSummary};

use crate::error::{JobwatchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Lifecycle
// ============================================================================

/// Lifecycle state of a tracked posting.
///
/// Every posting starts as `New`. Later sightings move it to `Seen` (content
/// unchanged) or `Modified` (content digest differs); a batch that omits it
/// moves it to `Removed`. A removed posting that shows up again goes back to
/// `Seen` or `Modified`, never to `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    New,
    Seen,
    Modified,
    Removed,
}

impl JobStatus {
    /// Canonical display order used by reports
    pub const ALL: [JobStatus; 4] = [
        JobStatus::New,
        JobStatus::Seen,
        JobStatus::Modified,
        JobStatus::Removed,
    ];

    /// Convert to string representation (the persisted form)
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::Seen => "seen",
            JobStatus::Modified => "modified",
            JobStatus::Removed => "removed",
        }
    }

    /// Whether the posting is still listed by its company
    pub fn is_active(&self) -> bool {
        !matches!(self, JobStatus::Removed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = JobwatchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(JobStatus::New),
            "seen" => Ok(JobStatus::Seen),
            "modified" => Ok(JobStatus::Modified),
            "removed" => Ok(JobStatus::Removed),
            _ => Err(JobwatchError::InvalidStatus(s.to_string())),
        }
    }
}

// ============================================================================
// Ingestion Types
// ============================================================================

/// A job as handed over by the discovery provider, before validation.
///
/// Unknown keys (including a per-item `company_name`) are ignored; the company
/// is always supplied by whoever submits the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    #[serde(default, alias = "job_title")]
    pub title: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl RawJob {
    /// Validate into a [`JobPosting`]. `index` is the item's batch position,
    /// reported back in the error.
    pub fn validate(self, index: usize) -> Result<JobPosting> {
        let title = required(self.title, index, "title")?;
        let url = required(self.url, index, "url")?;

        Ok(JobPosting {
            title,
            url,
            location: self.location.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, index: usize, field: &'static str) -> Result<String> {
    match value {
        None => Err(JobwatchError::validation(index, field, "is missing")),
        Some(v) if v.trim().is_empty() => Err(JobwatchError::validation(index, field, "is blank")),
        Some(v) => Ok(v),
    }
}

/// A validated incoming posting. `title` and `url` are guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub url: String,
    pub location: String,
    pub description: String,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            location: String::new(),
            description: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate a whole batch. Fails on the first invalid item, so nothing in
    /// a rejected batch ever reaches the store.
    pub fn parse_batch(raw: Vec<RawJob>) -> Result<Vec<JobPosting>> {
        raw.into_iter()
            .enumerate()
            .map(|(index, job)| job.validate(index))
            .collect()
    }

    /// Parse and validate a JSON array of jobs
    pub fn batch_from_json(json: &str) -> Result<Vec<JobPosting>> {
        let raw: Vec<RawJob> = serde_json::from_str(json)?;
        Self::parse_batch(raw)
    }
}

// ============================================================================
// Stored Types
// ============================================================================

/// One tracked posting as persisted in the `jobs` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub url: String,
    pub description: String,
    pub content_digest: String,
    /// Set once at creation; survives removal and resurrection
    pub date_first_seen: DateTime<Utc>,
    /// Last batch that contained this posting
    pub date_last_seen: DateTime<Utc>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Append-only audit row recording that `job_id` entered `status`.
///
/// Refers to its job by id only; history outlives retention cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub id: i64,
    pub job_id: String,
    pub status: JobStatus,
    pub change_date: DateTime<Utc>,
}
