//! `jobwatch history` command implementation

use crate::commands::{paint_status, Engine};
use crate::error::{CliError, Result};
use colored::Colorize;

/// Show the transition log of one job
pub async fn run(engine: &Engine, job_id: &str, json: bool) -> Result<()> {
    let entries = engine.store.history_for(job_id).await;

    if entries.is_empty() {
        return Err(CliError::JobNotFound(job_id.to_string()));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    // The record itself may already be gone after retention cleanup
    match engine.store.get(job_id).await {
        Some(job) => println!(
            "{} {} {}",
            job.job_title.bold(),
            "at".dimmed(),
            job.company_name
        ),
        None => println!("{} {}", job_id.bold(), "(record deleted)".dimmed()),
    }
    println!();

    for entry in &entries {
        println!(
            "  {} {}",
            entry.change_date.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed(),
            paint_status(entry.status)
        );
    }

    Ok(())
}
