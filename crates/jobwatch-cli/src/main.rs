//! Jobwatch CLI - Main entry point

use clap::Parser;
use jobwatch_cli::commands::{self, Engine};
use jobwatch_cli::{Cli, Commands};
use jobwatch_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Warnings only unless --verbose; LOG_* variables take precedence
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let base = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .build();
    let log_config = base.clone().merge_env().unwrap_or(base);

    // The CLI works without logging; keep the guard alive for file output
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> jobwatch_cli::Result<()> {
    let engine = Engine::open(cli.database.clone())?;

    match &cli.command {
        Commands::Ingest {
            company,
            file,
            json,
        } => commands::ingest::run(&engine, company, file, *json).await,

        Commands::Stats { json } => commands::stats::run(&engine, *json).await,

        Commands::Jobs {
            status,
            company,
            limit,
            json,
        } => commands::jobs::run(&engine, *status, company.as_deref(), *limit, *json).await,

        Commands::Companies => commands::companies::run(&engine).await,

        Commands::Company { name, json } => commands::company::run(&engine, name, *json).await,

        Commands::History { job_id, json } => {
            commands::history::run(&engine, job_id, *json).await
        },

        Commands::Report { output, save } => {
            commands::report::run(&engine, output.as_deref(), *save).await
        },

        Commands::Export {
            output,
            status,
            company,
        } => commands::export::run(&engine, output, *status, company.as_deref()).await,

        Commands::Cleanup { days } => commands::cleanup::run(&engine, *days).await,
    }
}
