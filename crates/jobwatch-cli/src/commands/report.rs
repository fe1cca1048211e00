//! `jobwatch report` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;
use std::path::Path;

/// Print the markdown report, or write it to `output` / the report directory
pub async fn run(engine: &Engine, output: Option<&Path>, save: bool) -> Result<()> {
    let reporting = engine.reporting();

    if save {
        let path = reporting.write_report(&engine.config.report_dir).await?;
        println!("{} Report saved to {}", "✓".green().bold(), path.display());
        return Ok(());
    }

    let report = reporting.generate_report().await;

    match output {
        Some(path) => {
            std::fs::write(path, report)?;
            println!("{} Report written to {}", "✓".green().bold(), path.display());
        },
        None => print!("{}", report),
    }

    Ok(())
}
