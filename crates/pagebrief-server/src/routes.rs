//! HTTP handlers

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use url::Url;

use pagebrief::SinkReceipt;

use crate::app::ApiState;

/// Path of the optional static landing page
const INDEX_PATH: &str = "static/index.html";

/// Minimal landing page served when no static asset is present
const INDEX_FALLBACK: &str = r#"<!DOCTYPE html>
<html>
<head><title>Pagebrief</title></head>
<body>
    <h1>API running</h1>
    <p>Extraction endpoint: POST /extract</p>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
    #[serde(default)]
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub message: String,
    pub document_id: Option<String>,
    pub document_url: Option<String>,
    pub extracted_content: Option<String>,
}

impl ExtractResponse {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            document_id: None,
            document_url: None,
            extracted_content: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_configured: bool,
}

/// Landing page: static asset when present, inline fallback otherwise
pub async fn index() -> Html<String> {
    match tokio::fs::read_to_string(INDEX_PATH).await {
        Ok(contents) => Html(contents),
        Err(_) => Html(INDEX_FALLBACK.to_string()),
    }
}

/// Liveness probe; reports whether a completion credential is configured
pub async fn health(Extension(state): Extension<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        ai_configured: state.extractor.ai_configured(),
    })
}

/// Run the extraction pipeline for a URL and hand the result to the sink
///
/// An unreachable page is the only request failure; summarizer problems
/// degrade the content instead of failing the call.
pub async fn extract(
    Extension(state): Extension<ApiState>,
    Json(request): Json<ExtractRequest>,
) -> (StatusCode, Json<ExtractResponse>) {
    if let Err(message) = validate_url(&request.url) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ExtractResponse::failure(message)),
        );
    }

    let result = match state.extractor.extract(&request.url).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "Extraction failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(ExtractResponse::failure(format!(
                    "Failed to access URL {}: {}",
                    request.url, e
                ))),
            );
        }
    };

    let receipt = match state
        .sink
        .create(
            &result.title,
            &result.structured_content,
            request.folder_id.as_deref(),
        )
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            tracing::warn!(error = %e, "Document sink failed");
            SinkReceipt {
                document_id: None,
                document_url: None,
                message: format!("Document storage unavailable: {}", e),
            }
        }
    };

    (
        StatusCode::OK,
        Json(ExtractResponse {
            success: true,
            message: receipt.message,
            document_id: receipt.document_id,
            document_url: receipt.document_url,
            extracted_content: Some(result.structured_content),
        }),
    )
}

/// Require an absolute http(s) URL before entering the pipeline
fn validate_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        Ok(parsed) => Err(format!("Unsupported URL scheme: {}", parsed.scheme())),
        Err(_) => Err("url must be an absolute http:// or https:// URL".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{router, ApiState};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn unconfigured_state() -> ApiState {
        ApiState::from_config(None, pagebrief::DEFAULT_GEMINI_MODEL.to_string())
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("").is_err());
    }

    #[tokio::test]
    async fn test_health_reports_unconfigured() {
        let app = router(unconfigured_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["ai_configured"], false);
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = router(unconfigured_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("<html"));
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_url() {
        let app = router(unconfigured_state());

        let request = Request::builder()
            .method("POST")
            .uri("/extract")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"url": "not-a-url"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["document_id"].is_null());
        assert!(json["extracted_content"].is_null());
    }

    #[tokio::test]
    async fn test_extract_reports_unreachable_url() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = router(unconfigured_state());
        let body = format!(r#"{{"url": "http://{}/"}}"#, addr);

        let request = Request::builder()
            .method("POST")
            .uri("/extract")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["success"], false);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Failed to access URL"));
        assert!(message.contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn test_extract_returns_fallback_content() {
        let mock_server = MockServer::start().await;
        let html = "<html><head><title>Example</title></head>\
                    <body><p>Hello from the page.</p></body></html>";

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
            .mount(&mock_server)
            .await;

        let app = router(unconfigured_state());
        let body = format!(r#"{{"url": "{}/", "folder_id": "folder-1"}}"#, mock_server.uri());

        let request = Request::builder()
            .method("POST")
            .uri("/extract")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        // Document creation is a pending capability, so ids stay null
        assert!(json["document_id"].is_null());
        assert!(json["document_url"].is_null());

        let content = json["extracted_content"].as_str().unwrap();
        assert!(content.starts_with(pagebrief::FALLBACK_PREFIX));
        assert!(content.contains("Hello from the page."));
    }
}
