//! Pagebrief - web page content extraction and AI summarization
//!
//! The pipeline turns a single URL into a structured summary:
//! fetch the page, strip markup noise, bound the text to a size the
//! completion model accepts, request a structured summary, and degrade
//! to a raw-text excerpt when the model call fails or no credential is
//! configured. Only an unreachable page fails a pipeline invocation.
//!
//! ```no_run
//! use pagebrief::Extractor;
//!
//! # async fn run() -> Result<(), pagebrief::FetchError> {
//! let extractor = Extractor::builder().build();
//! let result = extractor.extract("https://example.com").await?;
//! println!("{}", result.structured_content);
//! # Ok(())
//! # }
//! ```

pub mod bound;
mod error;
pub mod fetch;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod sink;
pub mod summarize;

pub use bound::{bound, BoundedText, TRUNCATION_MARKER};
pub use error::{FetchError, SinkError, SummarizeError};
pub use fetch::SourceDocument;
pub use pipeline::{
    degrade, ExtractionResult, Extractor, ExtractorBuilder, FALLBACK_EXCERPT_CHARS,
    FALLBACK_PREFIX, FETCH_TIMEOUT, MAX_CONTENT_CHARS, RAW_EXCERPT_CHARS,
};
pub use prompt::build_prompt;
pub use sanitize::{page_title, sanitize, CleanedText, DEFAULT_STRIP_TAGS};
pub use sink::{DocumentSink, PendingSink, SinkReceipt};
pub use summarize::{Completion, GeminiClient, DEFAULT_GEMINI_MODEL};

/// Browser-like User-Agent sent with page requests
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
