//! Serializable results returned by the tracker and the reporting layer

use super::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one diff batch for one company
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub company: String,
    /// Postings seen for the first time
    pub new_jobs: usize,
    /// Known postings whose content digest changed
    pub updated_jobs: usize,
    /// Known postings with identical content (includes resurrected ones)
    pub unchanged_jobs: usize,
    /// Active postings absent from this batch, now marked removed
    pub removed_jobs: usize,
    /// Every incoming item, duplicates included
    pub total_processed: usize,
    /// Items folded into an earlier item with the same job id
    #[serde(default)]
    pub duplicates_collapsed: usize,
}

/// Aggregate counts over the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Record count per persisted status string
    pub status_counts: BTreeMap<String, u64>,
    /// Record count per company
    pub company_counts: BTreeMap<String, u64>,
    /// Records last seen within the past 7 days
    pub recent_activity: u64,
    /// Records still `new` that were first seen within the past 24 hours
    pub new_jobs_today: u64,
    /// Always the sum of `status_counts`
    pub total_jobs: u64,
}

impl Statistics {
    pub fn count_for(&self, status: JobStatus) -> u64 {
        self.status_counts.get(status.as_str()).copied().unwrap_or(0)
    }
}

/// Store statistics stamped with the time they were taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total_jobs: u64,
    pub status_breakdown: BTreeMap<String, u64>,
    pub company_breakdown: BTreeMap<String, u64>,
    pub recent_activity: u64,
    pub new_jobs_today: u64,
    pub summary_date: DateTime<Utc>,
}

impl StatusSummary {
    pub fn from_statistics(stats: Statistics, summary_date: DateTime<Utc>) -> Self {
        Self {
            total_jobs: stats.total_jobs,
            status_breakdown: stats.status_counts,
            company_breakdown: stats.company_counts,
            recent_activity: stats.recent_activity,
            new_jobs_today: stats.new_jobs_today,
            summary_date,
        }
    }
}

/// Per-company counts; `last_activity` is `None` when the company has no records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPerformance {
    pub company_name: String,
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub removed_jobs: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

impl CompanyPerformance {
    pub fn empty(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            total_jobs: 0,
            active_jobs: 0,
            removed_jobs: 0,
            last_activity: None,
        }
    }
}
