//! `jobwatch company` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;

/// Show counts for one company
pub async fn run(engine: &Engine, name: &str, json: bool) -> Result<()> {
    let performance = engine.reporting().company_performance(name).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&performance)?);
        return Ok(());
    }

    println!("{}", performance.company_name.cyan().bold());
    println!("  Total jobs:    {}", performance.total_jobs);
    println!("  Active jobs:   {}", performance.active_jobs);
    println!("  Removed jobs:  {}", performance.removed_jobs);

    match performance.last_activity {
        Some(ts) => println!("  Last activity: {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Last activity: {}", "never".dimmed()),
    }

    Ok(())
}
