//! Per-company diff of an incoming batch against the stored records
//!
//! For each posting in the batch: unknown ids are inserted as `new`, known ids
//! are refreshed as `modified` when their content digest changed and `seen`
//! otherwise. Active records of the company that the batch no longer lists are
//! then marked `removed`. A removed record that reappears is a known id, so it
//! comes back as `seen` or `modified` with its first-seen time intact.

use crate::error::Result;
use crate::store::JobStore;
use jobwatch_common::identity::{derive_digest, derive_id};
use jobwatch_common::types::BatchSummary;
use jobwatch_common::{JobPosting, JobStatus};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct HistoryTracker {
    store: Arc<dyn JobStore>,
}

impl HistoryTracker {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Diff one batch for `company` against the store.
    ///
    /// Any store failure aborts the batch and is returned as is. Writes that
    /// already committed stay committed; replaying the same batch converges to
    /// the same final state.
    #[instrument(skip(self, company, jobs), fields(company = %company, incoming = jobs.len()))]
    pub async fn process_batch(&self, company: &str, jobs: Vec<JobPosting>) -> Result<BatchSummary> {
        let total_processed = jobs.len();
        let (jobs, duplicates_collapsed) = collapse_duplicates(jobs);

        if duplicates_collapsed > 0 {
            warn!(
                duplicates = duplicates_collapsed,
                "Batch lists the same job more than once; keeping the last occurrence"
            );
        }

        let existing = self.store.existing_for_company(company).await?;
        debug!(known = existing.len(), "Loaded stored jobs");

        let mut summary = BatchSummary {
            company: company.to_string(),
            total_processed,
            duplicates_collapsed,
            ..Default::default()
        };
        let mut current_ids = HashSet::with_capacity(jobs.len());

        for (job_id, job) in jobs {
            match existing.get(&job_id) {
                Some(record) if derive_digest(&job) != record.content_digest => {
                    self.store.update(&job_id, &job, JobStatus::Modified).await?;
                    summary.updated_jobs += 1;
                    info!(job_id = %job_id, title = %job.title, "Job modified");
                },
                Some(_) => {
                    self.store.update(&job_id, &job, JobStatus::Seen).await?;
                    summary.unchanged_jobs += 1;
                },
                None => {
                    self.store.insert(company, &job).await?;
                    summary.new_jobs += 1;
                    info!(job_id = %job_id, title = %job.title, "New job found");
                },
            }

            current_ids.insert(job_id);
        }

        summary.removed_jobs = self.store.mark_removed(company, &current_ids).await?;
        if summary.removed_jobs > 0 {
            info!(removed = summary.removed_jobs, "Marked jobs as removed");
        }

        info!(
            new = summary.new_jobs,
            updated = summary.updated_jobs,
            unchanged = summary.unchanged_jobs,
            removed = summary.removed_jobs,
            "Processed batch"
        );

        Ok(summary)
    }

    /// Validate a JSON array of job objects, then process it.
    ///
    /// An invalid item rejects the whole batch before the store is touched.
    pub async fn process_json(&self, company: &str, json: &str) -> Result<BatchSummary> {
        let jobs = JobPosting::batch_from_json(json)?;
        self.process_batch(company, jobs).await
    }
}

/// Fold postings sharing a job id into one entry. The last occurrence supplies
/// the content; the first occurrence fixes the position.
fn collapse_duplicates(jobs: Vec<JobPosting>) -> (Vec<(String, JobPosting)>, usize) {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(jobs.len());
    let mut unique: Vec<(String, JobPosting)> = Vec::with_capacity(jobs.len());
    let mut collapsed = 0;

    for job in jobs {
        let job_id = derive_id(&job.title, &job.url);
        match slots.get(&job_id) {
            Some(&slot) => {
                unique[slot].1 = job;
                collapsed += 1;
            },
            None => {
                slots.insert(job_id.clone(), unique.len());
                unique.push((job_id, job));
            },
        }
    }

    (unique, collapsed)
}
