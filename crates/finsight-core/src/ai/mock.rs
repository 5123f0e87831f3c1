//! Mock backend for testing
//!
//! Returns predictable responses for both insight operations, so tests and
//! development runs never need a live API key.

use async_trait::async_trait;

use crate::error::Result;

use super::InsightBackend;

/// Mock insight backend.
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default).
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend.
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    async fn summarize(&self, sample_csv: &str) -> Result<String> {
        let rows = sample_csv.lines().count().saturating_sub(1);
        Ok(format!(
            "- Reviewed a sample of {} rows\n\
             - No suspicious pattern stands out in the sample\n\
             - Suggested checks: amount outliers, duplicate merchants, weekend spikes",
            rows
        ))
    }

    async fn answer(&self, _sample_csv: &str, question: &str) -> Result<String> {
        Ok(format!("Mock answer to: {}", question))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_summarize_counts_sample_rows() {
        let backend = MockBackend::new();
        let summary = backend.summarize("Amount\n1\n2\n3\n").await.unwrap();
        assert!(summary.contains("3 rows"));
    }

    #[tokio::test]
    async fn test_unhealthy_backend() {
        assert!(!MockBackend::unhealthy().health_check().await);
    }

    #[tokio::test]
    async fn test_default_is_healthy() {
        assert!(MockBackend::default().health_check().await);
    }
}
