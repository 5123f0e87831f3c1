//! Analyze command: one-shot anomaly detection with printed summaries

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::{detect_anomalies_with, eda, Settings, ANOMALY_COLUMN};

use super::{load_normalized, truncate};

pub fn cmd_analyze(
    file: &Path,
    contamination: Option<f64>,
    seed: Option<u64>,
    limit: usize,
) -> Result<()> {
    let mut settings = Settings::from_env();
    if let Some(contamination) = contamination {
        settings.contamination = contamination;
    }
    if let Some(seed) = seed {
        settings.seed = seed;
    }
    settings.validate().context("Invalid detector settings")?;

    println!("🔍 Analyzing {}...", file.display());

    let frame = load_normalized(file)?;
    let labeled = detect_anomalies_with(&frame, &settings.detector_config())
        .context("Anomaly detection failed")?;

    let overview = eda::overview(&labeled);
    println!();
    println!("📊 Overview");
    println!(
        "   {} rows scored ({} dropped for missing numeric data), {} columns",
        overview.row_count,
        frame.row_count() - overview.row_count,
        overview.column_count
    );

    let totals = eda::daily_totals(&labeled);
    let by_total = |a: &&eda::DailyTotal, b: &&eda::DailyTotal| {
        a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal)
    };
    if let (Some(lo), Some(hi)) = (totals.iter().min_by(by_total), totals.iter().max_by(by_total))
    {
        println!();
        println!("📈 Daily spend ({} days)", totals.len());
        println!("   Quietest day: {}  {:>12.2}", lo.date, lo.total);
        println!("   Busiest day:  {}  {:>12.2}", hi.date, hi.total);
    }

    let merchants = eda::top_merchants(&labeled, limit);
    if !merchants.is_empty() {
        println!();
        println!("🏪 Top merchants");
        for m in &merchants {
            println!("   {:<32} {:>12.2}", truncate(&m.merchant, 32), m.total);
        }
    }

    let labels = labeled
        .column(ANOMALY_COLUMN)
        .and_then(|c| c.as_bool())
        .unwrap_or(&[]);
    let flagged: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter_map(|(row, &anomalous)| anomalous.then_some(row))
        .collect();

    println!();
    println!("🚨 Anomalies: {} flagged", flagged.len());
    let cell = |name: &str, row: usize| {
        labeled
            .column(name)
            .map(|c| c.value(row).to_string())
            .unwrap_or_default()
    };
    for &row in flagged.iter().take(limit) {
        println!(
            "   {:<12} {:<32} {:>12}",
            cell("Date", row),
            truncate(&cell("Merchant", row), 32),
            cell("Amount", row)
        );
    }
    if flagged.len() > limit {
        println!("   ... and {} more (raise --limit to see them)", flagged.len() - limit);
    }

    Ok(())
}
