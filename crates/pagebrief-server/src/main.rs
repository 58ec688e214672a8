//! Pagebrief server - HTTP surface for the extraction pipeline

mod app;
mod routes;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// HTTP service exposing the Pagebrief extraction pipeline
#[derive(Parser, Debug)]
#[command(name = "pagebrief-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    addr: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Gemini API key; omit to disable AI summarization
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model used for summarization
    #[arg(long, env = "GEMINI_MODEL", default_value = pagebrief::DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = app::ApiState::from_config(cli.gemini_api_key, cli.gemini_model);
    if !state.extractor.ai_configured() {
        tracing::warn!("GEMINI_API_KEY not configured; extraction will use the non-AI fallback");
    }

    let router = app::router(state);

    let addr = format!("{}:{}", cli.addr, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, router).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
