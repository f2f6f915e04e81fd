//! Nudge Proxy Server - Main entry point
//!
//! This binary loads configuration from the environment, builds the HTTP
//! client and router, and serves the chat endpoint.

use anyhow::{Context, Result};
use chrono::Local;
use nudge_proxy::{
    api::{build_router, AppState, CHAT_PATH},
    core::AppConfig,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env()?;

    match (
        config.credentials.anthropic_api_key.is_some(),
        config.credentials.openai_api_key.is_some(),
    ) {
        (false, false) => tracing::warn!(
            "Neither ANTHROPIC_API_KEY nor OPENAI_API_KEY is set; chat requests will fail"
        ),
        (anthropic, openai) => tracing::info!(
            anthropic_configured = anthropic,
            openai_configured = openai,
            "Provider credentials loaded"
        ),
    }

    let http_client = create_http_client(&config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let state = Arc::new(AppState::new(config, http_client));
    let app = build_router(state);

    tracing::info!("Starting Nudge proxy on {}", addr);
    tracing::info!("Chat endpoint: {}", CHAT_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Custom time formatter that uses local timezone (respects TZ environment variable)
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

fn init_tracing() {
    // NO_COLOR disables ANSI codes for file logging
    let no_color = std::env::var("NO_COLOR").is_ok();

    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,nudge_proxy=debug".to_string());

    // Always suppress noisy HTTP library logs regardless of RUST_LOG setting
    let filter_str = format!("{},hyper=warn,h2=warn,reqwest=warn", base_filter);
    let filter = tracing_subscriber::EnvFilter::new(filter_str);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(!no_color),
        )
        .init();
}

/// Create HTTP client with connection pooling
fn create_http_client(config: &AppConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(!config.verify_ssl)
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .build()
        .context("Failed to build HTTP client")
}
