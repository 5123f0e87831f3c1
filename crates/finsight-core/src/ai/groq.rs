//! Groq backend implementation
//!
//! Talks to the Groq chat-completions API, which follows the OpenAI wire
//! format (`/openai/v1/chat/completions`, Bearer auth). Requests use a low
//! temperature and a modest token cap; insight text is advisory, not load
//! bearing.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{dataset_summary_prompt, question_prompt, InsightBackend, SYSTEM_PROMPT};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 512;

/// Groq chat-completions backend.
#[derive(Clone)]
pub struct GroqBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GroqBackend {
    /// Create a backend against the public Groq endpoint.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a backend against a custom base URL (test servers, proxies).
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(&self, user_prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Insight(format!("Groq API error {}: {}", status, body)));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Insight("No response from Groq API".into()))
    }
}

#[async_trait]
impl InsightBackend for GroqBackend {
    async fn summarize(&self, sample_csv: &str) -> Result<String> {
        debug!(model = %self.model, "Requesting dataset summary");
        self.chat_completion(&dataset_summary_prompt(sample_csv))
            .await
    }

    async fn answer(&self, sample_csv: &str, question: &str) -> Result<String> {
        debug!(model = %self.model, "Requesting question answer");
        self.chat_completion(&question_prompt(sample_csv, question))
            .await
    }

    async fn health_check(&self) -> bool {
        let result = self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await;
        matches!(result, Ok(r) if r.status().is_success())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = GroqBackend::with_base_url("key", "m", "http://localhost:9999/");
        assert_eq!(backend.base_url, "http://localhost:9999");
        assert_eq!(backend.model(), "m");
    }

    #[test]
    fn test_request_serializes_openai_shape() {
        let request = ChatCompletionRequest {
            model: "llama3-70b-8192".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            temperature: 0.2,
            max_tokens: 512,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_health_check() {
        let backend = GroqBackend::with_base_url("key", "m", "http://127.0.0.1:1");
        assert!(!backend.health_check().await);
    }
}
