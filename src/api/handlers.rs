//! HTTP request handlers for the Nudge proxy API.

use crate::api::models::ChatRequest;
use crate::api::upstream::dispatch;
use crate::core::config::AppConfig;
use crate::core::logging::get_request_id;
use crate::core::{AppError, Result};
use crate::services::prompt::build_system_prompt;
use crate::services::provider::resolve_provider;
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde_json::Value;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

/// Handle a chat request.
///
/// The body is parsed from raw bytes so that malformed JSON is reported in
/// the same `{"error": ...}` shape as every other failure.
pub async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<Value>> {
    let payload: ChatRequest =
        serde_json::from_slice(&body).map_err(AppError::InvalidRequestBody)?;

    let credentials = &state.config.credentials;
    let provider = resolve_provider(payload.provider.as_deref(), credentials)?;
    let api_key = provider.api_key(credentials)?;

    let system_prompt = build_system_prompt(payload.context.as_ref());
    let upstream = provider.build_request(
        &state.config.endpoints,
        api_key,
        &system_prompt,
        payload.history.as_deref(),
        payload.message.as_deref().unwrap_or_default(),
    );

    tracing::debug!(
        request_id = %get_request_id(),
        provider = %provider,
        history_len = payload.history.as_ref().map(Vec::len),
        has_context = payload.context.is_some(),
        "Processing chat request"
    );

    let data = dispatch(&state.http_client, &upstream).await?;

    tracing::info!(
        request_id = %get_request_id(),
        provider = %provider,
        "Chat request completed"
    );
    Ok(Json(data))
}

/// Any method other than POST on the chat route (OPTIONS is answered by the CORS layer).
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}
