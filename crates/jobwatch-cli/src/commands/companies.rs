//! `jobwatch companies` command implementation

use crate::commands::Engine;
use crate::error::Result;
use colored::Colorize;

/// List companies with tracked jobs
pub async fn run(engine: &Engine) -> Result<()> {
    let companies = engine.store.all_companies().await;

    if companies.is_empty() {
        println!("No companies tracked yet.");
        return Ok(());
    }

    println!("{}", "Companies:".cyan().bold());
    for company in &companies {
        println!("  {}", company);
    }

    Ok(())
}
