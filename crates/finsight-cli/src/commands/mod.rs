//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Anomaly detection run with printed summaries
//! - `insights` - Insight backend queries (summary, free-text question)
//! - `report` - Plain-text report generation

pub mod analyze;
pub mod insights;
pub mod report;

// Re-export command functions for main.rs
pub use analyze::*;
pub use insights::*;
pub use report::*;

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::{load_csv_path, normalize, Frame};
use tracing::debug;

/// Load a CSV file and normalize it into the canonical schema
pub fn load_normalized(path: &Path) -> Result<Frame> {
    let raw =
        load_csv_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let frame = normalize(&raw);
    debug!(
        rows = frame.row_count(),
        columns = frame.column_count(),
        "Loaded and normalized input"
    );
    Ok(frame)
}

/// Truncate a string to a maximum byte length, adding "..." if truncated.
/// Cuts on a char boundary so multibyte names never panic.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
