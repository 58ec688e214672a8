//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur while fetching a page
///
/// Every variant is fatal to a pipeline invocation: an unreachable page
/// produces no result at all.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL is relative, unparseable, or has a non-http(s) scheme
    #[error("Invalid URL: must be an absolute http:// or https:// URL")]
    InvalidUrl,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Request exceeded the fetch time budget
    #[error("Request timed out: page did not complete within the fetch budget")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    Connect(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),

    /// Other request error
    #[error("Request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Classify a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect(err)
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Errors from the generative-completion capability
///
/// None of these cross the pipeline boundary: every variant is absorbed by
/// the fallback branch and surfaces only in logs.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// No API credential is configured; summarization should not be attempted
    #[error("AI summarization is not configured")]
    NotConfigured,

    /// Failed to build HTTP client
    #[error("Failed to create completion client")]
    ClientBuild(#[source] reqwest::Error),

    /// Transport-level failure talking to the completion API
    #[error("Completion request failed")]
    Network(#[from] reqwest::Error),

    /// Completion API answered with an error status
    #[error("Completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Completion API answered with a body we could not interpret
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// Generation was blocked before producing text
    #[error("Completion blocked: {0}")]
    Blocked(String),

    /// Response carried no generated text
    #[error("Completion returned no content")]
    Empty,
}

/// Errors from the document sink collaborator
#[derive(Debug, Error)]
pub enum SinkError {
    /// Backend rejected or failed the create call
    #[error("Document sink error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::MissingUrl.to_string(),
            "Missing required parameter: url"
        );
        assert_eq!(
            FetchError::InvalidUrl.to_string(),
            "Invalid URL: must be an absolute http:// or https:// URL"
        );
        assert_eq!(FetchError::Status(503).to_string(), "Server returned status 503");
        assert_eq!(
            FetchError::Timeout.to_string(),
            "Request timed out: page did not complete within the fetch budget"
        );
    }

    #[test]
    fn test_summarize_error_messages() {
        assert_eq!(
            SummarizeError::NotConfigured.to_string(),
            "AI summarization is not configured"
        );
        assert_eq!(
            SummarizeError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            }
            .to_string(),
            "Completion API error (429): quota exceeded"
        );
        assert_eq!(
            SummarizeError::Empty.to_string(),
            "Completion returned no content"
        );
    }

    #[test]
    fn test_sink_error_message() {
        assert_eq!(
            SinkError::Backend("no backend".to_string()).to_string(),
            "Document sink error: no backend"
        );
    }
}
