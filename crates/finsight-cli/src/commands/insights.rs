//! Insights command: ask the backend about a dataset sample

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::{InsightBackend, InsightClient, Settings, SAMPLE_ROWS};

use super::load_normalized;

pub async fn cmd_insights(file: &Path, question: Option<&str>) -> Result<()> {
    let settings = Settings::from_env();
    let client =
        InsightClient::from_settings(&settings).context("Insight backend unavailable")?;

    let frame = load_normalized(file)?;
    let sample = frame.head_csv(SAMPLE_ROWS);

    println!("🤖 Asking {} about {}...", client.model(), file.display());

    let reply = match question {
        Some(question) => client.answer(&sample, question).await,
        None => client.summarize(&sample).await,
    }
    .context("Insight request failed")?;

    println!();
    println!("{}", reply.trim_end());

    Ok(())
}
