//! Generative completion clients
//!
//! The pipeline depends on the [`Completion`] trait rather than a concrete
//! client, so tests can substitute a deterministic fake. The shipping
//! implementation talks to the Gemini generateContent API.

use crate::error::SummarizeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production Gemini API endpoint
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Connect timeout for the completion client
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default budget for a single completion request
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// A generative text-completion capability
#[async_trait]
pub trait Completion: Send + Sync {
    /// Generate text for the given prompt
    ///
    /// A single attempt; implementations perform no retries.
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

/// Google Gemini API client
///
/// Holds the API credential injected at construction time; nothing in the
/// pipeline reads configuration ad hoc.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with the default request timeout
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, SummarizeError> {
        Self::with_timeout(api_key, model, DEFAULT_COMPLETION_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(SummarizeError::ClientBuild)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Override the API endpoint; tests point this at a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Completion for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::MalformedResponse(e.to_string()))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(SummarizeError::Empty)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(SummarizeError::Blocked(
                "generation stopped by safety filters".to_string(),
            ));
        }

        let text = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or(SummarizeError::Empty)?
            .text;

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "hello".to_string(),
                }],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"contents":[{"parts":[{"text":"hello"}]}]}"#);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [
                {
                    "content": {"parts": [{"text": "summary text"}]},
                    "finishReason": "STOP"
                }
            ]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].content.parts[0].text, "summary text");
        assert_eq!(parsed.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_response_without_candidates() {
        let parsed: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn test_model_name() {
        let client = GeminiClient::new("key", DEFAULT_GEMINI_MODEL).unwrap();
        assert_eq!(client.model_name(), "gemini-1.5-pro");
    }
}
