//! Statistics, reports and exports built on the store's read queries

pub mod csv_export;
pub mod markdown;

use crate::clock::Clock;
use crate::error::{CliError, Result};
use crate::store::JobStore;
use jobwatch_common::types::{CompanyPerformance, StatusSummary};
use jobwatch_common::{JobRecord, JobStatus};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Jobs listed per section in the markdown report
pub const REPORT_SECTION_LIMIT: usize = 5;

pub struct ReportingFacade {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
}

impl ReportingFacade {
    pub fn new(store: Arc<dyn JobStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Store statistics stamped with the current time
    pub async fn status_summary(&self) -> StatusSummary {
        let stats = self.store.statistics().await;
        StatusSummary::from_statistics(stats, self.clock.now())
    }

    /// Most recently seen records in `status`
    pub async fn recent_by_status(&self, status: JobStatus, limit: usize) -> Vec<JobRecord> {
        self.store.jobs_by_status(status, limit).await
    }

    /// Markdown report of the whole store
    pub async fn generate_report(&self) -> String {
        let summary = self.status_summary().await;
        let new_jobs = self
            .recent_by_status(JobStatus::New, REPORT_SECTION_LIMIT)
            .await;
        let modified_jobs = self
            .recent_by_status(JobStatus::Modified, REPORT_SECTION_LIMIT)
            .await;

        markdown::render(&summary, &new_jobs, &modified_jobs)
    }

    /// Save the report as `daily_report_<YYYY-MM-DD>.md` under `dir`
    pub async fn write_report(&self, dir: &Path) -> Result<PathBuf> {
        let report = self.generate_report().await;
        let path = dir.join(format!(
            "daily_report_{}.md",
            self.clock.now().format("%Y-%m-%d")
        ));

        fs::create_dir_all(dir)?;
        fs::write(&path, report)?;

        info!(path = %path.display(), "Saved status report");
        Ok(path)
    }

    /// Export matching records to a CSV file. Returns the number of rows.
    pub async fn export_csv(
        &self,
        path: &Path,
        status: Option<JobStatus>,
        company: Option<&str>,
    ) -> Result<usize> {
        let jobs = self.store.all_jobs(company, status).await;

        let written = File::create(path)
            .map_err(CliError::from)
            .and_then(|file| csv_export::write_jobs(BufWriter::new(file), &jobs))
            .inspect_err(|e| {
                error!(error = %e, path = %path.display(), "Failed to export jobs to CSV");
            })?;

        info!(rows = written, path = %path.display(), "Exported jobs to CSV");
        Ok(written)
    }

    /// Counts for one company. Unknown companies get all zeros.
    pub async fn company_performance(&self, company: &str) -> CompanyPerformance {
        let jobs = self.store.all_jobs(Some(company), None).await;

        if jobs.is_empty() {
            return CompanyPerformance::empty(company);
        }

        CompanyPerformance {
            company_name: company.to_string(),
            total_jobs: jobs.len(),
            active_jobs: jobs.iter().filter(|job| job.is_active()).count(),
            removed_jobs: jobs.iter().filter(|job| !job.is_active()).count(),
            last_activity: jobs.iter().map(|job| job.date_last_seen).max(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::SqliteJobStore;
    use crate::tracker::HistoryTracker;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use jobwatch_common::JobPosting;
    use tempfile::TempDir;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
    }

    struct Fixture {
        tracker: HistoryTracker,
        facade: ReportingFacade,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(start()));
        let store: Arc<dyn JobStore> = Arc::new(SqliteJobStore::in_memory(clock.clone()).unwrap());
        Fixture {
            tracker: HistoryTracker::new(store.clone()),
            facade: ReportingFacade::new(store, clock.clone()),
            clock,
        }
    }

    async fn populate(f: &Fixture) {
        f.tracker
            .process_batch(
                "Acme",
                vec![
                    JobPosting::new("Data Analyst", "https://x/1").with_location("Paris"),
                    JobPosting::new("ML Engineer", "https://x/2"),
                ],
            )
            .await
            .unwrap();
        f.tracker
            .process_batch("Globex", vec![JobPosting::new("Designer", "https://g/1")])
            .await
            .unwrap();

        f.clock.advance(Duration::days(2));
        f.tracker
            .process_batch(
                "Acme",
                vec![JobPosting::new("Data Analyst", "https://x/1")
                    .with_location("Paris")
                    .with_description("Now remote friendly")],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_summary() {
        let f = fixture();
        populate(&f).await;

        let summary = f.facade.status_summary().await;
        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.status_breakdown["new"], 1);
        assert_eq!(summary.status_breakdown["modified"], 1);
        assert_eq!(summary.status_breakdown["removed"], 1);
        assert_eq!(summary.company_breakdown["Acme"], 2);
        assert_eq!(summary.summary_date, start() + Duration::days(2));
    }

    #[tokio::test]
    async fn test_generate_report_sections() {
        let f = fixture();
        populate(&f).await;

        let report = f.facade.generate_report().await;
        assert!(report.contains("- **Total Jobs Tracked:** 3"));
        assert!(report.contains("- **Modified:** 1"));
        assert!(!report.contains("**Seen:**"));
        assert!(report.contains("## Recent New Jobs\n### Designer"));
        assert!(report.contains("## Recent Modified Jobs\n### Data Analyst"));
        assert!(report.contains("- **Apply:** https://x/1"));

        // Same store, same clock: same report
        assert_eq!(report, f.facade.generate_report().await);
    }

    #[tokio::test]
    async fn test_write_report_uses_dated_file_name() {
        let f = fixture();
        populate(&f).await;
        let dir = TempDir::new().unwrap();

        let path = f.facade.write_report(&dir.path().join("reports")).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "daily_report_2026-06-03.md");
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("# Job Tracking Status Report"));
    }

    #[tokio::test]
    async fn test_export_csv_with_filters() {
        let f = fixture();
        populate(&f).await;
        let dir = TempDir::new().unwrap();

        let all = dir.path().join("all.csv");
        assert_eq!(f.facade.export_csv(&all, None, None).await.unwrap(), 3);

        let acme_removed = dir.path().join("acme_removed.csv");
        let rows = f
            .facade
            .export_csv(&acme_removed, Some(JobStatus::Removed), Some("Acme"))
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let content = std::fs::read_to_string(&acme_removed).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"ML Engineer\""));
    }

    #[tokio::test]
    async fn test_export_csv_to_missing_directory_fails() {
        let f = fixture();
        let dir = TempDir::new().unwrap();

        let result = f
            .facade
            .export_csv(&dir.path().join("missing").join("out.csv"), None, None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_company_performance() {
        let f = fixture();
        populate(&f).await;

        let acme = f.facade.company_performance("Acme").await;
        assert_eq!(acme.total_jobs, 2);
        assert_eq!(acme.active_jobs, 1);
        assert_eq!(acme.removed_jobs, 1);
        assert_eq!(acme.last_activity, Some(start() + Duration::days(2)));

        let unknown = f.facade.company_performance("Initech").await;
        assert_eq!(unknown, CompanyPerformance::empty("Initech"));
    }
}
