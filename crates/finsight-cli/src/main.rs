//! FinSight CLI - Transaction anomaly analysis
//!
//! Usage:
//!   finsight analyze --file transactions.csv     Run anomaly detection
//!   finsight insights --file transactions.csv    Ask the insight backend
//!   finsight report --file t.csv --output r.txt  Write a text report

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            contamination,
            seed,
            limit,
        } => commands::cmd_analyze(&file, contamination, seed, limit),
        Commands::Insights { file, question } => {
            commands::cmd_insights(&file, question.as_deref()).await
        }
        Commands::Report {
            file,
            output,
            insights,
        } => commands::cmd_report(&file, &output, insights).await,
    }
}
