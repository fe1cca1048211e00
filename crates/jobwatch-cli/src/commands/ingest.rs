//! `jobwatch ingest` command implementation
//!
//! Reads a JSON array of postings and diffs it against the stored jobs of one
//! company.

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;
use jobwatch_common::types::BatchSummary;
use std::io::Read;

/// Process one batch from `file` ("-" for stdin)
pub async fn run(engine: &Engine, company: &str, file: &str, json: bool) -> Result<()> {
    let input = read_input(file)?;
    let summary = engine.tracker().process_json(company, &input).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "{} Processed {} jobs for {}",
        "✓".green().bold(),
        summary.total_processed,
        summary.company.bold()
    );
    println!("  {} {}", "New:".cyan(), summary.new_jobs);
    println!("  {} {}", "Updated:".cyan(), summary.updated_jobs);
    println!("  {} {}", "Unchanged:".cyan(), summary.unchanged_jobs);
    println!("  {} {}", "Removed:".cyan(), summary.removed_jobs);

    if summary.duplicates_collapsed > 0 {
        println!(
            "  {} {} duplicate entries collapsed",
            "→".yellow(),
            summary.duplicates_collapsed
        );
    }
}
