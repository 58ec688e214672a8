//! Page fetching
//!
//! A single bounded-time GET per pipeline invocation. Connection failures,
//! non-success statuses, and deadline overruns all classify as [`FetchError`];
//! there are no retries and no partial results.

use crate::error::FetchError;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::{error, warn};
use url::Url;

/// Connect timeout, separate from the total fetch budget
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched page, before any processing
///
/// Owned by the pipeline invocation that fetched it and discarded after
/// sanitization.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// The validated absolute URL the markup came from
    pub url: Url,
    /// Payload as received, lossily decoded to UTF-8
    pub raw_markup: String,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

/// Fetch a page with a single GET bounded by `timeout`
pub async fn fetch_document(
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<SourceDocument, FetchError> {
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(FetchError::InvalidUrl);
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html, text/plain, */*;q=0.8"),
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .map_err(FetchError::ClientBuild)?;

    // The body read shares the same deadline as the request itself, so the
    // whole fetch stays inside one budget.
    let deadline = tokio::time::Instant::now() + timeout;

    let response = client
        .get(parsed.as_str())
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = read_body_until(response, deadline).await?;
    let raw_markup = String::from_utf8_lossy(&body).to_string();

    Ok(SourceDocument {
        url: parsed,
        raw_markup,
        fetched_at: Utc::now(),
    })
}

/// Read the full response body, failing if the deadline passes first
async fn read_body_until(
    response: reqwest::Response,
    deadline: tokio::time::Instant,
) -> Result<Bytes, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    loop {
        tokio::select! {
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        error!("Error reading body chunk: {}", e);
                        return Err(FetchError::Request(e.to_string()));
                    }
                    None => {
                        // Stream complete
                        return Ok(Bytes::from(body));
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                warn!("Fetch deadline reached before body completed");
                return Err(FetchError::Timeout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_empty_url() {
        let result = fetch_document("", DEFAULT_USER_AGENT, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(FetchError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_fetch_relative_url() {
        let result = fetch_document("/page", DEFAULT_USER_AGENT, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_scheme() {
        let result =
            fetch_document("ftp://example.com", DEFAULT_USER_AGENT, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/", addr);
        let result = fetch_document(&url, DEFAULT_USER_AGENT, Duration::from_secs(5)).await;
        assert!(result.is_err());
    }
}
