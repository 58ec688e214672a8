//! Extraction pipeline orchestration
//!
//! One canonical pipeline, parameterized where the policy allows it:
//! fetch -> sanitize -> bound -> prompt -> summarize, with a non-AI
//! fallback branch. Only a fetch failure crosses the boundary as an
//! error; a summarizer failure degrades the result instead.

use crate::bound::{bound, BoundedText};
use crate::error::{FetchError, SummarizeError};
use crate::fetch::{fetch_document, SourceDocument};
use crate::prompt::build_prompt;
use crate::sanitize::{page_title, sanitize, CleanedText, DEFAULT_STRIP_TAGS};
use crate::summarize::Completion;
use crate::DEFAULT_USER_AGENT;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Maximum characters of cleaned text handed to the completion model
pub const MAX_CONTENT_CHARS: usize = 30_000;

/// Characters of cleaned text kept as the raw excerpt
pub const RAW_EXCERPT_CHARS: usize = 5_000;

/// Characters of cleaned text kept in the degraded (no-AI) result
pub const FALLBACK_EXCERPT_CHARS: usize = 10_000;

/// Total budget for the page fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of the degraded result produced when summarization is unavailable
pub const FALLBACK_PREFIX: &str = "Content extracted without AI processing:\n\n";

/// Result of one pipeline invocation
///
/// Assembled once per invocation and never mutated afterward. A value of
/// this type means the page was reachable; fetch failures surface as
/// [`FetchError`] instead.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The fetched URL
    pub url: String,
    /// Page title, or a label derived from the URL when the page has none
    pub title: String,
    /// AI summary, or the degraded excerpt when the fallback branch ran
    pub structured_content: String,
    /// Leading slice of the cleaned text, independent of the branch taken
    pub raw_excerpt: String,
    /// True when the non-AI fallback produced `structured_content`
    pub used_fallback: bool,
    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Builder for configuring an [`Extractor`]
#[derive(Default)]
pub struct ExtractorBuilder {
    max_chars: Option<usize>,
    raw_excerpt_chars: Option<usize>,
    fallback_excerpt_chars: Option<usize>,
    fetch_timeout: Option<Duration>,
    user_agent: Option<String>,
    strip_tags: Option<Vec<String>>,
    completion: Option<Arc<dyn Completion>>,
}

impl ExtractorBuilder {
    /// Create a builder with the reference policy defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Character budget for text handed to the completion model
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Length of the raw excerpt kept alongside the summary
    pub fn raw_excerpt_chars(mut self, chars: usize) -> Self {
        self.raw_excerpt_chars = Some(chars);
        self
    }

    /// Length of the excerpt used in the degraded result
    pub fn fallback_excerpt_chars(mut self, chars: usize) -> Self {
        self.fallback_excerpt_chars = Some(chars);
        self
    }

    /// Total time budget for the page fetch
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// User-Agent sent with page requests
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Tags whose subtrees are dropped during sanitization
    pub fn strip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Completion capability; omit to disable AI summarization
    pub fn completion(mut self, completion: Arc<dyn Completion>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Build the extractor
    pub fn build(self) -> Extractor {
        Extractor {
            max_chars: self.max_chars.unwrap_or(MAX_CONTENT_CHARS),
            raw_excerpt_chars: self.raw_excerpt_chars.unwrap_or(RAW_EXCERPT_CHARS),
            fallback_excerpt_chars: self
                .fallback_excerpt_chars
                .unwrap_or(FALLBACK_EXCERPT_CHARS),
            fetch_timeout: self.fetch_timeout.unwrap_or(FETCH_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            strip_tags: self
                .strip_tags
                .unwrap_or_else(|| DEFAULT_STRIP_TAGS.iter().map(|t| t.to_string()).collect()),
            completion: self.completion,
        }
    }
}

/// Configured extraction pipeline
///
/// Read-only after construction; one instance serves any number of
/// concurrent invocations.
pub struct Extractor {
    max_chars: usize,
    raw_excerpt_chars: usize,
    fallback_excerpt_chars: usize,
    fetch_timeout: Duration,
    user_agent: String,
    strip_tags: Vec<String>,
    completion: Option<Arc<dyn Completion>>,
}

impl Extractor {
    /// Create a new extractor builder
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Whether a completion capability is configured
    pub fn ai_configured(&self) -> bool {
        self.completion.is_some()
    }

    /// Run the full pipeline for one URL
    ///
    /// Errors only when the page itself is unreachable; every summarizer
    /// failure is absorbed by the fallback branch.
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult, FetchError> {
        let document = fetch_document(url, &self.user_agent, self.fetch_timeout).await?;
        Ok(self.process(document).await)
    }

    /// Run the post-fetch stages on an already fetched document
    async fn process(&self, document: SourceDocument) -> ExtractionResult {
        let strip_tags: Vec<&str> = self.strip_tags.iter().map(String::as_str).collect();
        let cleaned = sanitize(&document.raw_markup, &strip_tags);

        let title = page_title(&document.raw_markup)
            .unwrap_or_else(|| format!("Extraction: {}", document.url));

        // The excerpt comes from the cleaned text regardless of whether
        // summarization succeeds.
        let raw_excerpt: String = cleaned
            .content
            .chars()
            .take(self.raw_excerpt_chars)
            .collect();

        let bounded = bound(&cleaned.content, self.max_chars);
        if bounded.was_truncated {
            tracing::debug!(
                chars = cleaned.char_count,
                budget = self.max_chars,
                "Content truncated before summarization"
            );
        }

        let (structured_content, used_fallback) =
            match self.summarize(document.url.as_str(), &bounded).await {
                Ok(text) => (text, false),
                Err(SummarizeError::NotConfigured) => {
                    tracing::info!(url = %document.url, "AI summarization not configured; using fallback");
                    (degrade(&cleaned, self.fallback_excerpt_chars), true)
                }
                Err(e) => {
                    tracing::warn!(url = %document.url, error = %e, "AI summarization failed; using fallback");
                    (degrade(&cleaned, self.fallback_excerpt_chars), true)
                }
            };

        ExtractionResult {
            url: document.url.to_string(),
            title,
            structured_content,
            raw_excerpt,
            used_fallback,
            fetched_at: document.fetched_at,
        }
    }

    async fn summarize(
        &self,
        url: &str,
        bounded: &BoundedText,
    ) -> Result<String, SummarizeError> {
        let completion = self
            .completion
            .as_ref()
            .ok_or(SummarizeError::NotConfigured)?;

        let prompt = build_prompt(url, &bounded.content);
        completion.complete(&prompt).await
    }
}

/// Build the degraded result used when summarization is unavailable
///
/// Total over any cleaned text, including empty input; the terminal
/// recovery path with nothing beneath it.
pub fn degrade(cleaned: &CleanedText, excerpt_chars: usize) -> String {
    let excerpt: String = cleaned.content.chars().take(excerpt_chars).collect();
    format!("{FALLBACK_PREFIX}{excerpt}")
}
