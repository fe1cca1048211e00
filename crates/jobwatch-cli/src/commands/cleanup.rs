//! `jobwatch cleanup` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;

/// Delete removed jobs last seen more than `days` ago
pub async fn run(engine: &Engine, days: Option<u32>) -> Result<()> {
    let days = days.unwrap_or(engine.config.retention_days);
    let deleted = engine.store.cleanup(days).await?;

    if deleted == 0 {
        println!("{} Nothing to clean up", "→".cyan());
    } else {
        println!(
            "{} Deleted {} removed jobs older than {} days",
            "✓".green().bold(),
            deleted,
            days
        );
    }

    Ok(())
}
