//! `jobwatch jobs` command implementation

use crate::commands::{truncate_string, Engine};
use crate::error::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use jobwatch_common::{JobRecord, JobStatus};

/// List tracked jobs, most recently seen first
pub async fn run(
    engine: &Engine,
    status: Option<JobStatus>,
    company: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let jobs: Vec<JobRecord> = match (status, company) {
        (Some(status), None) => engine.store.jobs_by_status(status, limit).await,
        _ => engine
            .store
            .all_jobs(company, status)
            .await
            .into_iter()
            .take(limit)
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["ID", "Company", "Title", "Location", "Status", "Last Seen"]);

    for job in &jobs {
        table.add_row(vec![
            job.job_id.clone(),
            job.company_name.clone(),
            truncate_string(&job.job_title, 40),
            truncate_string(&job.location, 24),
            job.status.to_string(),
            job.date_last_seen.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{}", table);
    println!("Showing {} jobs", jobs.len());

    Ok(())
}
