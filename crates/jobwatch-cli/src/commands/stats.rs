//! `jobwatch stats` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use jobwatch_common::JobStatus;

/// Show store statistics
pub async fn run(engine: &Engine, json: bool) -> Result<()> {
    let summary = engine.reporting().status_summary().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.total_jobs == 0 {
        println!("No jobs tracked yet.");
        println!("Run 'jobwatch ingest --company <NAME> --file <FILE>' to add some.");
        return Ok(());
    }

    println!("{}", "Overview:".cyan().bold());
    println!("  Total jobs:      {}", summary.total_jobs);
    println!("  Active (7 days): {}", summary.recent_activity);
    println!("  New today:       {}", summary.new_jobs_today);
    println!();

    let mut statuses = Table::new();
    statuses
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Status", "Jobs"]);

    for status in JobStatus::ALL {
        let count = summary
            .status_breakdown
            .get(status.as_str())
            .copied()
            .unwrap_or(0);
        statuses.add_row(vec![status.to_string(), count.to_string()]);
    }

    println!("{}", statuses);
    println!();

    let mut companies = Table::new();
    companies
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Company", "Jobs"]);

    for (company, count) in &summary.company_breakdown {
        companies.add_row(vec![company.clone(), count.to_string()]);
    }

    println!("{}", companies);

    Ok(())
}
