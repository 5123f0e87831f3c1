//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinSight - Transaction anomaly analysis
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Anomaly detection and insights for transaction CSV exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run anomaly detection and print summaries
    Analyze {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Expected anomaly fraction in (0, 1)
        ///
        /// Overrides FINSIGHT_CONTAMINATION. Default 0.05.
        #[arg(long)]
        contamination: Option<f64>,

        /// RNG seed for reproducible runs
        ///
        /// Overrides FINSIGHT_SEED. Default 42.
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum rows per printed table
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Ask the insight backend about a dataset
    Insights {
        /// CSV file to sample
        #[arg(short, long)]
        file: PathBuf,

        /// Free-text question (omit for a standing summary)
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Write a plain-text analysis report
    Report {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Report output path
        #[arg(short, long)]
        output: PathBuf,

        /// Include an AI-generated summary section (requires GROQ_API_KEY)
        #[arg(long)]
        insights: bool,
    },
}
