//! SQLite schema for job records and their transition log

use crate::error::Result;
use rusqlite::Connection;

/// Initialize the job store schema. Safe to run on every open.
pub fn init_schema(conn: &Connection) -> Result<()> {
    // One row per tracked posting
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            job_id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL,
            job_title TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            url TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',

            -- RFC 3339, UTC, microseconds: lexical order is chronological
            date_first_seen TEXT NOT NULL,
            date_last_seen TEXT NOT NULL,

            status TEXT NOT NULL,
            content_digest TEXT NOT NULL,

            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        [],
    )?;

    // Append-only status transitions. job_id refers to jobs.job_id logically
    // but is not a declared foreign key: history is kept after cleanup
    // deletes the job row.
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS job_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id TEXT NOT NULL,
            status TEXT NOT NULL,
            change_date TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company_name)",
        [],
    )?;

    conn.execute("CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs(status)", [])?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_date ON jobs(date_last_seen)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_job_id ON job_history(job_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_date ON job_history(change_date)",
        [],
    )?;

    Ok(())
}
