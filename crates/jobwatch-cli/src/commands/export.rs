//! `jobwatch export` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;
use jobwatch_common::JobStatus;
use std::path::Path;

/// Export matching jobs to a CSV file
pub async fn run(
    engine: &Engine,
    output: &Path,
    status: Option<JobStatus>,
    company: Option<&str>,
) -> Result<()> {
    let rows = engine
        .reporting()
        .export_csv(output, status, company)
        .await?;

    println!(
        "{} Exported {} jobs to {}",
        "✓".green().bold(),
        rows,
        output.display()
    );

    Ok(())
}
