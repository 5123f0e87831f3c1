//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

const SAMPLE_CSV: &str = "\
date,amount,merchant
2024-01-01,10.00,Coffee Corner
2024-01-02,$12.50,Coffee Corner
2024-01-02,9.75,Lunch Spot
2024-01-03,11.20,Coffee Corner
2024-01-04,10.80,Lunch Spot
2024-01-05,10000.00,Wire Transfer
";

fn write_sample_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_analyze_defaults() {
    let cli = Cli::parse_from(["finsight", "analyze", "--file", "t.csv"]);
    match cli.command {
        Commands::Analyze {
            file,
            contamination,
            seed,
            limit,
        } => {
            assert_eq!(file.to_str(), Some("t.csv"));
            assert!(contamination.is_none());
            assert!(seed.is_none());
            assert_eq!(limit, 10);
        }
        _ => panic!("expected analyze subcommand"),
    }
}

#[test]
fn test_parse_insights_question() {
    let cli = Cli::parse_from([
        "finsight", "insights", "--file", "t.csv", "--question", "why?",
    ]);
    match cli.command {
        Commands::Insights { question, .. } => {
            assert_eq!(question.as_deref(), Some("why?"));
        }
        _ => panic!("expected insights subcommand"),
    }
}

#[test]
fn test_parse_report_flags() {
    let cli = Cli::parse_from([
        "finsight", "report", "--file", "t.csv", "--output", "r.txt", "--insights",
    ]);
    match cli.command {
        Commands::Report {
            output, insights, ..
        } => {
            assert_eq!(output.to_str(), Some("r.txt"));
            assert!(insights);
        }
        _ => panic!("expected report subcommand"),
    }
}

// ========== Command Tests ==========

#[test]
fn test_cmd_analyze_runs_on_sample() {
    let csv = write_sample_csv();
    let result = commands::cmd_analyze(csv.path(), None, None, 10);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_rejects_bad_contamination() {
    let csv = write_sample_csv();
    let result = commands::cmd_analyze(csv.path(), Some(1.5), None, 10);
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_missing_file_fails() {
    let result = commands::cmd_analyze(std::path::Path::new("no-such.csv"), None, None, 10);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_report_writes_sections() {
    let csv = write_sample_csv();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("report.txt");

    commands::cmd_report(csv.path(), &out_path, false)
        .await
        .unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("FinSight Transaction Report\n"));
    assert!(text.contains("\nOverview\n"));
    assert!(text.contains("\nDaily Spending\n"));
    assert!(text.contains("\nTop Merchants\n"));
    assert!(text.contains("Anomalies ("));
    assert!(text.contains("Wire Transfer"));
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long merchant name", 10), "a very ...");
}

#[test]
fn test_truncate_cuts_on_char_boundary() {
    // Cut point lands inside the two-byte 'é'; back up instead of panicking
    assert_eq!(truncate("aaaaaaé plus more text", 10), "aaaaaa...");
    assert_eq!(truncate("Café Déjà Vu Boulangerie", 10), "Café D...");
}
