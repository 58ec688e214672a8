//! Document sink boundary
//!
//! Extraction results flow to an external document store. The store is an
//! abstract capability so backends can be swapped without touching the
//! pipeline; the only shipping implementation reports the feature as
//! pending.

use crate::error::SinkError;
use async_trait::async_trait;

/// Outcome of a document create call
#[derive(Debug, Clone)]
pub struct SinkReceipt {
    /// Identifier of the stored document, when one was created
    pub document_id: Option<String>,
    /// Link to the stored document, when one was created
    pub document_url: Option<String>,
    /// Human-readable outcome description
    pub message: String,
}

/// Destination for extracted documents
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Store a document, returning a receipt describing the outcome
    async fn create(
        &self,
        title: &str,
        content: &str,
        folder_id: Option<&str>,
    ) -> Result<SinkReceipt, SinkError>;
}

/// Placeholder sink used until a real document backend is wired in
///
/// Never fails: it acknowledges the call with an empty receipt so callers
/// still receive the extracted content.
#[derive(Debug, Default)]
pub struct PendingSink;

#[async_trait]
impl DocumentSink for PendingSink {
    async fn create(
        &self,
        title: &str,
        _content: &str,
        folder_id: Option<&str>,
    ) -> Result<SinkReceipt, SinkError> {
        tracing::info!(title, ?folder_id, "Document creation not yet available; skipping");

        Ok(SinkReceipt {
            document_id: None,
            document_url: None,
            message: "Document creation is not yet available".to_string(),
        })
    }
}
