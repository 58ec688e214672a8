//! Application state and router assembly

use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pagebrief::{Completion, DocumentSink, Extractor, GeminiClient, PendingSink};

use crate::routes;

/// Shared application state
///
/// Everything here is read-only after startup, so one instance serves all
/// concurrent requests without locking.
#[derive(Clone)]
pub struct ApiState {
    pub extractor: Arc<Extractor>,
    pub sink: Arc<dyn DocumentSink>,
}

impl ApiState {
    /// Build state from process configuration
    ///
    /// A missing or unusable credential disables summarization; the
    /// pipeline then serves fallback content for every request.
    pub fn from_config(api_key: Option<String>, model: String) -> Self {
        let completion = api_key
            .filter(|key| !key.is_empty())
            .and_then(|key| match GeminiClient::new(key, model) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn Completion>),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build completion client");
                    None
                }
            });

        let mut builder = Extractor::builder();
        if let Some(completion) = completion {
            builder = builder.completion(completion);
        }

        Self {
            extractor: Arc::new(builder.build()),
            sink: Arc::new(PendingSink),
        }
    }
}

/// Build the application router
pub fn router(state: ApiState) -> Router {
    // Browser clients call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/extract", post(routes::extract))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
