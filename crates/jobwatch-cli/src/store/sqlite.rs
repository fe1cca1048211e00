//! SQLite job store
//!
//! One connection guarded by a mutex. Each trait method locks it, runs its
//! statements (writes inside a single transaction, so a record change and its
//! transition row commit together) and unlocks before returning.

use crate::clock::{Clock, SystemClock};
use crate::error::{CliError, Result};
use crate::store::{schema, JobStore};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use jobwatch_common::identity::{derive_digest, derive_id};
use jobwatch_common::types::Statistics;
use jobwatch_common::{JobPosting, JobRecord, JobStatus, JobwatchError, TransitionEntry};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, instrument, warn};

const RECORD_COLUMNS: &str = "job_id, company_name, job_title, location, url, description, \
     content_digest, date_first_seen, date_last_seen, status, created_at, updated_at";

/// Persisted timestamp form: fixed-width RFC 3339 in UTC
pub(crate) fn to_db_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_db_time(value: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn parse_status(value: &str, column: usize) -> rusqlite::Result<JobStatus> {
    value.parse().map_err(|e: JobwatchError| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
    })
}

fn row_to_record(row: &Row) -> rusqlite::Result<JobRecord> {
    Ok(JobRecord {
        job_id: row.get(0)?,
        company_name: row.get(1)?,
        job_title: row.get(2)?,
        location: row.get(3)?,
        url: row.get(4)?,
        description: row.get(5)?,
        content_digest: row.get(6)?,
        date_first_seen: parse_db_time(&row.get::<_, String>(7)?, 7)?,
        date_last_seen: parse_db_time(&row.get::<_, String>(8)?, 8)?,
        status: parse_status(&row.get::<_, String>(9)?, 9)?,
        created_at: parse_db_time(&row.get::<_, String>(10)?, 10)?,
        updated_at: parse_db_time(&row.get::<_, String>(11)?, 11)?,
    })
}

fn row_to_transition(row: &Row) -> rusqlite::Result<TransitionEntry> {
    Ok(TransitionEntry {
        id: row.get(0)?,
        job_id: row.get(1)?,
        status: parse_status(&row.get::<_, String>(2)?, 2)?,
        change_date: parse_db_time(&row.get::<_, String>(3)?, 3)?,
    })
}

fn query_records<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<JobRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let records = stmt
        .query_map(params, row_to_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

fn count_grouped(conn: &Connection, sql: &str) -> Result<BTreeMap<String, u64>> {
    let mut stmt = conn.prepare(sql)?;
    let counts = stmt
        .query_map([], |row| {
            let count: i64 = row.get(1)?;
            Ok((row.get::<_, String>(0)?, u64::try_from(count).unwrap_or(0)))
        })?
        .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
    Ok(counts)
}

fn count_one<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<u64> {
    let count: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or(0))
}

fn append_transition(
    conn: &Connection,
    job_id: &str,
    status: JobStatus,
    change_date: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO job_history (job_id, status, change_date) VALUES (?1, ?2, ?3)",
        params![job_id, status.as_str(), change_date],
    )?;
    Ok(())
}

/// SQLite implementation of [`JobStore`]
pub struct SqliteJobStore {
    db: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteJobStore {
    /// Open (creating if needed) the database at `db_path`
    pub fn open(db_path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let is_new = !db_path.exists();
        let conn = Connection::open(db_path)?;
        let store = Self::from_connection(conn, clock)?;

        if is_new {
            info!(path = %db_path.display(), "Created new job database");
        }

        Ok(store)
    }

    /// Open with the system clock
    pub fn open_default(db_path: impl AsRef<Path>) -> Result<Self> {
        Self::open(db_path, Arc::new(SystemClock))
    }

    /// A private in-memory store, discarded on drop
    pub fn in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, clock)
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> Result<Self> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        schema::init_schema(&conn)?;

        Ok(Self {
            db: Mutex::new(conn),
            clock,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(CliError::lock)
    }

    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    fn load_company(&self, company: &str) -> Result<HashMap<String, JobRecord>> {
        let conn = self.conn()?;
        let records = query_records(
            &conn,
            &format!("SELECT {RECORD_COLUMNS} FROM jobs WHERE company_name = ?1"),
            params![company],
        )?;

        Ok(records
            .into_iter()
            .map(|record| (record.job_id.clone(), record))
            .collect())
    }

    #[instrument(skip(self, job), fields(title = %job.title))]
    fn insert_job(&self, company: &str, job: &JobPosting) -> Result<String> {
        let job_id = derive_id(&job.title, &job.url);
        let digest = derive_digest(job);
        let now = to_db_time(self.clock.now());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let owner: Option<String> = tx
            .query_row(
                "SELECT company_name FROM jobs WHERE job_id = ?1",
                params![job_id],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing_company) = owner {
            if existing_company != company {
                return Err(CliError::IdentityCollision {
                    job_id,
                    existing_company,
                    incoming_company: company.to_string(),
                });
            }
        }

        tx.execute(
            r#"
            INSERT INTO jobs (
                job_id, company_name, job_title, location, url, description,
                content_digest, date_first_seen, date_last_seen, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?9, ?8, ?8)
            "#,
            params![
                job_id,
                company,
                job.title,
                job.location,
                job.url,
                job.description,
                digest,
                now,
                JobStatus::New.as_str(),
            ],
        )?;

        append_transition(&tx, &job_id, JobStatus::New, &now)?;
        tx.commit()?;

        debug!(job_id = %job_id, "Inserted job");
        Ok(job_id)
    }

    #[instrument(skip(self, job))]
    fn update_job(&self, job_id: &str, job: &JobPosting, status: JobStatus) -> Result<()> {
        let digest = derive_digest(job);
        let now = to_db_time(self.clock.now());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let previous: Option<String> = tx
            .query_row(
                "SELECT status FROM jobs WHERE job_id = ?1",
                params![job_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(previous) = previous else {
            return Err(CliError::JobNotFound(job_id.to_string()));
        };

        tx.execute(
            r#"
            UPDATE jobs
            SET job_title = ?1, location = ?2, description = ?3, content_digest = ?4,
                date_last_seen = ?5, status = ?6, updated_at = ?5
            WHERE job_id = ?7
            "#,
            params![
                job.title,
                job.location,
                job.description,
                digest,
                now,
                status.as_str(),
                job_id,
            ],
        )?;

        if previous != status.as_str() {
            append_transition(&tx, job_id, status, &now)?;
            debug!(from = %previous, to = %status, "Job status changed");
        }

        tx.commit()?;
        Ok(())
    }

    #[instrument(skip(self, current_ids), fields(current = current_ids.len()))]
    fn mark_company_removed(&self, company: &str, current_ids: &HashSet<String>) -> Result<usize> {
        let now = to_db_time(self.clock.now());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let active: Vec<String> = {
            let mut stmt = tx.prepare(
                "SELECT job_id FROM jobs WHERE company_name = ?1 AND status != ?2 ORDER BY job_id",
            )?;
            let ids = stmt
                .query_map(params![company, JobStatus::Removed.as_str()], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            ids
        };

        let removed: Vec<String> = active
            .into_iter()
            .filter(|job_id| !current_ids.contains(job_id))
            .collect();

        for job_id in &removed {
            tx.execute(
                "UPDATE jobs SET status = ?1, updated_at = ?2 WHERE job_id = ?3",
                params![JobStatus::Removed.as_str(), now, job_id],
            )?;
            append_transition(&tx, job_id, JobStatus::Removed, &now)?;
        }

        tx.commit()?;
        Ok(removed.len())
    }

    fn delete_expired(&self, retention_days: u32) -> Result<usize> {
        // A window reaching past the earliest representable time matches nothing
        let Some(cutoff) = Duration::try_days(i64::from(retention_days))
            .and_then(|window| self.clock.now().checked_sub_signed(window))
        else {
            debug!(retention_days, "Retention window exceeds the time range");
            return Ok(0);
        };

        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM jobs WHERE status = ?1 AND date_last_seen < ?2",
            params![JobStatus::Removed.as_str(), to_db_time(cutoff)],
        )?;

        Ok(deleted)
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    fn try_statistics(&self) -> Result<Statistics> {
        let now = self.clock.now();
        let conn = self.conn()?;

        let status_counts = count_grouped(&conn, "SELECT status, COUNT(*) FROM jobs GROUP BY status")?;
        let company_counts = count_grouped(
            &conn,
            "SELECT company_name, COUNT(*) FROM jobs GROUP BY company_name",
        )?;

        let recent_activity = count_one(
            &conn,
            "SELECT COUNT(*) FROM jobs WHERE date_last_seen >= ?1",
            params![to_db_time(now - Duration::days(7))],
        )?;

        let new_jobs_today = count_one(
            &conn,
            "SELECT COUNT(*) FROM jobs WHERE status = ?1 AND date_first_seen >= ?2",
            params![JobStatus::New.as_str(), to_db_time(now - Duration::days(1))],
        )?;

        let total_jobs: u64 = status_counts.values().sum();

        Ok(Statistics {
            status_counts,
            company_counts,
            recent_activity,
            new_jobs_today,
            total_jobs,
        })
    }

    fn try_jobs_by_status(&self, status: JobStatus, limit: usize) -> Result<Vec<JobRecord>> {
        let conn = self.conn()?;
        query_records(
            &conn,
            &format!(
                "SELECT {RECORD_COLUMNS} FROM jobs WHERE status = ?1 \
                 ORDER BY date_last_seen DESC, job_id ASC LIMIT ?2"
            ),
            params![status.as_str(), i64::try_from(limit).unwrap_or(i64::MAX)],
        )
    }

    fn try_all_jobs(&self, company: Option<&str>, status: Option<JobStatus>) -> Result<Vec<JobRecord>> {
        let conn = self.conn()?;
        query_records(
            &conn,
            &format!(
                "SELECT {RECORD_COLUMNS} FROM jobs \
                 WHERE (?1 IS NULL OR company_name = ?1) AND (?2 IS NULL OR status = ?2) \
                 ORDER BY date_last_seen DESC, job_id ASC"
            ),
            params![company, status.map(|s| s.as_str())],
        )
    }

    fn try_all_companies(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT company_name FROM jobs ORDER BY company_name")?;
        let companies = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(companies)
    }

    fn try_get(&self, job_id: &str) -> Result<Option<JobRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM jobs WHERE job_id = ?1"),
                params![job_id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn try_history(&self, job_id: &str) -> Result<Vec<TransitionEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, job_id, status, change_date FROM job_history WHERE job_id = ?1 ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![job_id], row_to_transition)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn try_transition_count(&self) -> Result<u64> {
        let conn = self.conn()?;
        count_one(&conn, "SELECT COUNT(*) FROM job_history", [])
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn existing_for_company(&self, company: &str) -> Result<HashMap<String, JobRecord>> {
        self.load_company(company).inspect_err(|e| {
            error!(error = %e, company = %company, "Failed to load existing jobs");
        })
    }

    async fn insert(&self, company: &str, job: &JobPosting) -> Result<String> {
        self.insert_job(company, job).inspect_err(|e| {
            error!(error = %e, company = %company, title = %job.title, "Failed to insert job");
        })
    }

    async fn update(&self, job_id: &str, job: &JobPosting, status: JobStatus) -> Result<()> {
        self.update_job(job_id, job, status).inspect_err(|e| {
            error!(error = %e, job_id = %job_id, status = %status, "Failed to update job");
        })
    }

    async fn mark_removed(&self, company: &str, current_ids: &HashSet<String>) -> Result<usize> {
        self.mark_company_removed(company, current_ids).inspect_err(|e| {
            error!(error = %e, company = %company, "Failed to mark jobs as removed");
        })
    }

    async fn cleanup(&self, retention_days: u32) -> Result<usize> {
        match self.delete_expired(retention_days) {
            Ok(deleted) => {
                info!(deleted, retention_days, "Cleaned up removed job records");
                Ok(deleted)
            },
            Err(e) => {
                error!(error = %e, retention_days, "Failed to clean up removed job records");
                Err(e)
            },
        }
    }

    async fn statistics(&self) -> Statistics {
        self.try_statistics().unwrap_or_else(|e| {
            error!(error = %e, "Failed to compute job statistics");
            Statistics::default()
        })
    }

    async fn jobs_by_status(&self, status: JobStatus, limit: usize) -> Vec<JobRecord> {
        self.try_jobs_by_status(status, limit).unwrap_or_else(|e| {
            error!(error = %e, status = %status, "Failed to list jobs by status");
            Vec::new()
        })
    }

    async fn all_jobs(&self, company: Option<&str>, status: Option<JobStatus>) -> Vec<JobRecord> {
        self.try_all_jobs(company, status).unwrap_or_else(|e| {
            error!(error = %e, company = ?company, status = ?status, "Failed to list jobs");
            Vec::new()
        })
    }

    async fn all_companies(&self) -> Vec<String> {
        self.try_all_companies().unwrap_or_else(|e| {
            error!(error = %e, "Failed to list companies");
            Vec::new()
        })
    }

    async fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.try_get(job_id).unwrap_or_else(|e| {
            warn!(error = %e, job_id = %job_id, "Failed to load job");
            None
        })
    }

    async fn history_for(&self, job_id: &str) -> Vec<TransitionEntry> {
        self.try_history(job_id).unwrap_or_else(|e| {
            warn!(error = %e, job_id = %job_id, "Failed to load job history");
            Vec::new()
        })
    }

    async fn transition_count(&self) -> u64 {
        self.try_transition_count().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to count transitions");
            0
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn test_store() -> (SqliteJobStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let store = SqliteJobStore::in_memory(clock.clone()).unwrap();
        (store, clock)
    }

    fn analyst() -> JobPosting {
        JobPosting::new("Data Analyst", "https://x/1")
            .with_location("Paris")
            .with_description("SQL and dashboards")
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_insert_creates_new_record_and_transition() {
        let (store, _clock) = test_store();

        let job_id = store.insert("Acme", &analyst()).await.unwrap();
        assert_eq!(job_id, derive_id("Data Analyst", "https://x/1"));

        let record = store.get(&job_id).await.unwrap();
        assert_eq!(record.status, JobStatus::New);
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.content_digest, derive_digest(&analyst()));
        assert_eq!(record.date_first_seen, start());
        assert_eq!(record.date_first_seen, record.date_last_seen);

        let history = store.history_for(&job_id).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, JobStatus::New);
        assert_eq!(history[0].change_date, start());
    }

    #[tokio::test]
    async fn test_update_logs_transition_only_on_status_change() {
        let (store, clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();

        clock.advance(Duration::hours(1));
        store.update(&job_id, &analyst(), JobStatus::Seen).await.unwrap();
        clock.advance(Duration::hours(1));
        store.update(&job_id, &analyst(), JobStatus::Seen).await.unwrap();

        let history = store.history_for(&job_id).await;
        let statuses: Vec<JobStatus> = history.iter().map(|h| h.status).collect();
        assert_eq!(statuses, vec![JobStatus::New, JobStatus::Seen]);

        let record = store.get(&job_id).await.unwrap();
        assert_eq!(record.date_first_seen, start());
        assert_eq!(record.date_last_seen, start() + Duration::hours(2));
        assert_eq!(record.updated_at, start() + Duration::hours(2));
    }

    #[tokio::test]
    async fn test_update_refreshes_content() {
        let (store, _clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();

        let edited = analyst().with_description("SQL, dbt and dashboards");
        store.update(&job_id, &edited, JobStatus::Modified).await.unwrap();

        let record = store.get(&job_id).await.unwrap();
        assert_eq!(record.description, "SQL, dbt and dashboards");
        assert_eq!(record.content_digest, derive_digest(&edited));
        assert_eq!(record.status, JobStatus::Modified);
    }

    #[tokio::test]
    async fn test_update_unknown_job_fails_without_writing() {
        let (store, _clock) = test_store();

        let err = store.update("missing", &analyst(), JobStatus::Seen).await.unwrap_err();
        assert!(matches!(err, CliError::JobNotFound(ref id) if id == "missing"));
        assert_eq!(store.transition_count().await, 0);
    }

    #[tokio::test]
    async fn test_insert_identity_collision_across_companies() {
        let (store, _clock) = test_store();
        store.insert("Acme", &analyst()).await.unwrap();

        let err = store.insert("Globex", &analyst()).await.unwrap_err();
        match err {
            CliError::IdentityCollision {
                existing_company,
                incoming_company,
                ..
            } => {
                assert_eq!(existing_company, "Acme");
                assert_eq!(incoming_company, "Globex");
            },
            other => panic!("unexpected error: {other}"),
        }

        // Nothing was written for the rejected insert
        assert_eq!(store.transition_count().await, 1);
        assert_eq!(store.all_companies().await, vec!["Acme".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_same_company_is_a_store_error() {
        let (store, _clock) = test_store();
        store.insert("Acme", &analyst()).await.unwrap();

        let err = store.insert("Acme", &analyst()).await.unwrap_err();
        assert!(matches!(err, CliError::Store(_)));
        assert_eq!(store.transition_count().await, 1);
    }

    #[tokio::test]
    async fn test_mark_removed_is_idempotent() {
        let (store, _clock) = test_store();
        let kept = store.insert("Acme", &analyst()).await.unwrap();
        let dropped = store
            .insert("Acme", &JobPosting::new("ML Engineer", "https://x/2"))
            .await
            .unwrap();
        let other = store
            .insert("Globex", &JobPosting::new("Analyst", "https://g/1"))
            .await
            .unwrap();

        let removed = store.mark_removed("Acme", &ids(&[&kept])).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.get(&dropped).await.unwrap().status, JobStatus::Removed);
        assert_eq!(store.get(&kept).await.unwrap().status, JobStatus::New);
        assert_eq!(store.get(&other).await.unwrap().status, JobStatus::New);

        let before = store.transition_count().await;
        let removed_again = store.mark_removed("Acme", &ids(&[&kept])).await.unwrap();
        assert_eq!(removed_again, 0);
        assert_eq!(store.transition_count().await, before);
    }

    #[tokio::test]
    async fn test_mark_removed_keeps_last_seen() {
        let (store, clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();

        clock.advance(Duration::days(3));
        store.mark_removed("Acme", &HashSet::new()).await.unwrap();

        let record = store.get(&job_id).await.unwrap();
        assert_eq!(record.date_last_seen, start());
        assert_eq!(record.updated_at, start() + Duration::days(3));
    }

    #[tokio::test]
    async fn test_existing_for_company_includes_removed() {
        let (store, _clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();
        store.mark_removed("Acme", &HashSet::new()).await.unwrap();

        let existing = store.existing_for_company("Acme").await.unwrap();
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[&job_id].status, JobStatus::Removed);
        assert!(store.existing_for_company("Globex").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_only_deletes_expired_removed_jobs() {
        let (store, clock) = test_store();
        let old_removed = store.insert("Acme", &analyst()).await.unwrap();
        let old_active = store
            .insert("Acme", &JobPosting::new("ML Engineer", "https://x/2"))
            .await
            .unwrap();
        store.mark_removed("Acme", &ids(&[&old_active])).await.unwrap();

        clock.advance(Duration::days(80));
        let recent_removed = store
            .insert("Acme", &JobPosting::new("BI Developer", "https://x/3"))
            .await
            .unwrap();
        store.mark_removed("Acme", &ids(&[&old_active])).await.unwrap();

        clock.advance(Duration::days(20));
        let deleted = store.cleanup(90).await.unwrap();
        assert_eq!(deleted, 1);

        assert!(store.get(&old_removed).await.is_none());
        assert!(store.get(&old_active).await.is_some());
        assert!(store.get(&recent_removed).await.is_some());

        // History of the deleted job is retained
        assert_eq!(store.history_for(&old_removed).await.len(), 2);

        assert_eq!(store.cleanup(90).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_with_huge_retention_window() {
        let (store, clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();
        store.mark_removed("Acme", &HashSet::new()).await.unwrap();
        clock.advance(Duration::days(365));

        assert_eq!(store.cleanup(u32::MAX).await.unwrap(), 0);
        assert_eq!(store.cleanup(1_000_000).await.unwrap(), 0);
        assert!(store.get(&job_id).await.is_some());

        let system = SqliteJobStore::in_memory(Arc::new(SystemClock)).unwrap();
        assert_eq!(system.cleanup(u32::MAX).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_statistics_windows_and_totals() {
        let (store, clock) = test_store();
        let first = store.insert("Acme", &analyst()).await.unwrap();
        store
            .insert("Globex", &JobPosting::new("Analyst", "https://g/1"))
            .await
            .unwrap();

        clock.advance(Duration::days(2));
        store
            .insert("Acme", &JobPosting::new("ML Engineer", "https://x/2"))
            .await
            .unwrap();
        store.update(&first, &analyst(), JobStatus::Seen).await.unwrap();

        let stats = store.statistics().await;
        assert_eq!(stats.total_jobs, 3);
        assert_eq!(stats.total_jobs, stats.status_counts.values().sum::<u64>());
        assert_eq!(stats.count_for(JobStatus::New), 2);
        assert_eq!(stats.count_for(JobStatus::Seen), 1);
        assert_eq!(stats.company_counts["Acme"], 2);
        assert_eq!(stats.company_counts["Globex"], 1);
        assert_eq!(stats.recent_activity, 3);
        // Only the job first seen within the last day
        assert_eq!(stats.new_jobs_today, 1);

        clock.advance(Duration::days(8));
        let stats = store.statistics().await;
        assert_eq!(stats.recent_activity, 0);
        assert_eq!(stats.new_jobs_today, 0);
    }

    #[tokio::test]
    async fn test_listings_order_and_filters() {
        let (store, clock) = test_store();
        let older = store.insert("Acme", &analyst()).await.unwrap();
        clock.advance(Duration::minutes(5));
        let newer = store
            .insert("Acme", &JobPosting::new("ML Engineer", "https://x/2"))
            .await
            .unwrap();
        clock.advance(Duration::minutes(5));
        store
            .insert("Globex", &JobPosting::new("Analyst", "https://g/1"))
            .await
            .unwrap();

        let acme: Vec<String> = store
            .all_jobs(Some("Acme"), None)
            .await
            .into_iter()
            .map(|r| r.job_id)
            .collect();
        assert_eq!(acme, vec![newer.clone(), older.clone()]);

        assert_eq!(store.all_jobs(None, None).await.len(), 3);
        assert!(store.all_jobs(None, Some(JobStatus::Removed)).await.is_empty());

        let limited = store.jobs_by_status(JobStatus::New, 2).await;
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].job_id, newer);

        assert_eq!(
            store.all_companies().await,
            vec!["Acme".to_string(), "Globex".to_string()]
        );
    }

    #[tokio::test]
    async fn test_reads_degrade_and_writes_fail_on_broken_store() {
        let (store, _clock) = test_store();
        let job_id = store.insert("Acme", &analyst()).await.unwrap();

        store.conn().unwrap().execute("DROP TABLE jobs", []).unwrap();

        assert_eq!(store.statistics().await, Statistics::default());
        assert!(store.all_jobs(None, None).await.is_empty());
        assert!(store.jobs_by_status(JobStatus::New, 10).await.is_empty());
        assert!(store.all_companies().await.is_empty());
        assert!(store.get(&job_id).await.is_none());

        assert!(store.existing_for_company("Acme").await.is_err());
        assert!(store.insert("Acme", &analyst()).await.is_err());
        assert!(store.mark_removed("Acme", &HashSet::new()).await.is_err());
        assert!(store.cleanup(90).await.is_err());
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("jobs.db");

        {
            let store = SqliteJobStore::open_default(&path).unwrap();
            store.insert("Acme", &analyst()).await.unwrap();
        }

        let reopened = SqliteJobStore::open_default(&path).unwrap();
        assert_eq!(reopened.all_jobs(None, None).await.len(), 1);
    }
}
