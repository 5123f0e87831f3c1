//! Insight backend abstraction
//!
//! A backend-agnostic seam for natural-language insight generation. The
//! core hands a backend a rendered CSV sample and (optionally) a free-text
//! question and gets text back; nothing downstream depends on the content
//! of that text for correctness.
//!
//! - `InsightBackend` trait: the interface every backend implements
//! - `InsightClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `GroqBackend`, `MockBackend`

mod groq;
mod mock;

pub use groq::GroqBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::Result;

/// Number of rows rendered into the CSV sample handed to a backend.
pub const SAMPLE_ROWS: usize = 50;

/// System prompt shared by all insight requests.
pub(crate) const SYSTEM_PROMPT: &str = "You are FinSight AI assistant. Be concise and actionable.";

/// Prompt asking for a standing summary of a dataset sample.
pub(crate) fn dataset_summary_prompt(sample_csv: &str) -> String {
    format!(
        "You are a data analyst specialized in fintech transactions. \
         Given the following CSV snippet (first rows) and column names, \
         produce a concise bullet-list of:\n\
         1) top suspicious patterns to investigate, \
         2) three suggested anomaly detection checks, \
         3) a one-paragraph summary of spending trends.\n\n\
         Data:\n{sample_csv}\n\nReturn plain text bullets."
    )
}

/// Prompt answering a user question over a dataset sample.
pub(crate) fn question_prompt(sample_csv: &str, question: &str) -> String {
    format!(
        "Given the following CSV data snippet:\n{sample_csv}\n\
         Answer this question:\n{question}\n\
         Provide clear and concise response."
    )
}

/// Trait defining the interface for all insight backends.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Produce a standing summary of the dataset sample.
    async fn summarize(&self, sample_csv: &str) -> Result<String>;

    /// Answer a free-text question about the dataset sample.
    async fn answer(&self, sample_csv: &str, question: &str) -> Result<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Model name (for logging).
    fn model(&self) -> &str;
}

/// Concrete insight client enum.
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum InsightClient {
    /// Groq chat-completions backend
    Groq(GroqBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl InsightClient {
    /// Create a client from validated settings.
    ///
    /// Fails when the settings lack an API key; the host is expected to
    /// have called `Settings::validate_for_insights` at startup, this
    /// re-checks so a client can never exist without credentials.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate_for_insights()?;
        Ok(InsightClient::Groq(GroqBackend::new(
            &settings.groq_api_key,
            &settings.groq_model,
        )))
    }

    /// Create a mock backend for testing.
    pub fn mock() -> Self {
        InsightClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl InsightBackend for InsightClient {
    async fn summarize(&self, sample_csv: &str) -> Result<String> {
        match self {
            InsightClient::Groq(b) => b.summarize(sample_csv).await,
            InsightClient::Mock(b) => b.summarize(sample_csv).await,
        }
    }

    async fn answer(&self, sample_csv: &str, question: &str) -> Result<String> {
        match self {
            InsightClient::Groq(b) => b.answer(sample_csv, question).await,
            InsightClient::Mock(b) => b.answer(sample_csv, question).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            InsightClient::Groq(b) => b.health_check().await,
            InsightClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            InsightClient::Groq(b) => b.model(),
            InsightClient::Mock(b) => b.model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_api_key_is_config_error() {
        let settings = Settings::default();
        assert!(InsightClient::from_settings(&settings).is_err());
    }

    #[test]
    fn test_mock_client_model() {
        let client = InsightClient::mock();
        assert_eq!(client.model(), "mock");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = InsightClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_answer_echoes_question() {
        let client = InsightClient::mock();
        let reply = client
            .answer("Amount\n10\n", "what stands out?")
            .await
            .unwrap();
        assert!(reply.contains("what stands out?"));
    }
}
