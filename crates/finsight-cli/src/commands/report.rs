//! Report command: assemble and write the plain-text report

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::{
    detect_anomalies_with, eda, render_report, Frame, InsightBackend, InsightClient,
    ReportSection, Settings, ANOMALY_COLUMN, SAMPLE_ROWS,
};

use super::{load_normalized, truncate};

pub async fn cmd_report(file: &Path, output: &Path, insights: bool) -> Result<()> {
    let settings = Settings::from_env();
    settings.validate().context("Invalid detector settings")?;

    println!("📝 Building report for {}...", file.display());

    let frame = load_normalized(file)?;
    let labeled = detect_anomalies_with(&frame, &settings.detector_config())
        .context("Anomaly detection failed")?;

    let mut sections = build_sections(&frame, &labeled);

    if insights {
        let client =
            InsightClient::from_settings(&settings).context("Insight backend unavailable")?;
        let summary = client
            .summarize(&labeled.head_csv(SAMPLE_ROWS))
            .await
            .context("Insight request failed")?;
        sections.push(ReportSection::new("AI Summary", summary));
    }

    let text = render_report("FinSight Transaction Report", &sections);
    std::fs::write(output, &text)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    println!("✅ Report written to {}", output.display());
    Ok(())
}

/// Build the standard report sections from the raw and labeled frames.
pub(crate) fn build_sections(raw: &Frame, labeled: &Frame) -> Vec<ReportSection> {
    let mut sections = Vec::new();

    let overview = eda::overview(labeled);
    sections.push(ReportSection::new(
        "Overview",
        format!(
            "Generated: {}\nRows scored: {}\nRows dropped (missing numeric data): {}\nColumns: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M"),
            overview.row_count,
            raw.row_count() - overview.row_count,
            overview.column_count
        ),
    ));

    let totals = eda::daily_totals(labeled);
    if !totals.is_empty() {
        let body: String = totals
            .iter()
            .map(|t| format!("{}  {:>12.2}\n", t.date, t.total))
            .collect();
        sections.push(ReportSection::new("Daily Spending", body));
    }

    let merchants = eda::top_merchants(labeled, 10);
    if !merchants.is_empty() {
        let body: String = merchants
            .iter()
            .map(|m| format!("{:<32} {:>12.2}\n", truncate(&m.merchant, 32), m.total))
            .collect();
        sections.push(ReportSection::new("Top Merchants", body));
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
    let body = if flagged.is_empty() {
        "No anomalous transactions flagged.".to_string()
    } else {
        let cell = |name: &str, row: usize| {
            labeled
                .column(name)
                .map(|c| c.value(row).to_string())
                .unwrap_or_default()
        };
        flagged
            .iter()
            .map(|&row| {
                format!(
                    "{:<12} {:<32} {:>12}\n",
                    cell("Date", row),
                    truncate(&cell("Merchant", row), 32),
                    cell("Amount", row)
                )
            })
            .collect()
    };
    sections.push(ReportSection::new(
        format!("Anomalies ({} flagged)", flagged.len()),
        body,
    ));

    sections
}
