//! Outbound request execution against the provider APIs.
//!
//! Each step of the call (send, body read, JSON decode, status check) maps to
//! its own [`AppError`] variant so the handler never needs a catch-all.

use crate::core::{AppError, Result};
use crate::services::provider::{UpstreamAuth, UpstreamRequest};
use axum::http::StatusCode;
use serde_json::Value;

/// Message used when a failed provider response carries no error message.
pub const DEFAULT_UPSTREAM_ERROR: &str = "API request failed";

/// Build a provider request with its auth and optional Anthropic version header.
pub fn build_upstream_request(
    http_client: &reqwest::Client,
    upstream: &UpstreamRequest,
) -> reqwest::RequestBuilder {
    let mut request = http_client
        .post(&upstream.url)
        .header("Content-Type", "application/json");

    request = match &upstream.auth {
        UpstreamAuth::Bearer(api_key) => {
            request.header("Authorization", format!("Bearer {}", api_key))
        }
        UpstreamAuth::XApiKey(api_key) => request.header("x-api-key", api_key),
    };

    if let Some(version) = upstream.anthropic_version {
        request = request.header("anthropic-version", version);
    }

    request.json(&upstream.body)
}

/// Extract the provider's error message from a failed response body.
///
/// Both providers report `{"error": {"message": "..."}}`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(|s| s.to_string())
}

/// Normalize reqwest status code into axum status code.
fn normalize_upstream_status(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Send the request and return the provider's JSON body on success.
///
/// The body is decoded before the status is inspected, so a non-JSON error
/// page surfaces as a decode failure rather than a forwarded status.
pub async fn dispatch(http_client: &reqwest::Client, upstream: &UpstreamRequest) -> Result<Value> {
    let response = build_upstream_request(http_client, upstream)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(
                provider = %upstream.provider,
                url = %upstream.url,
                error = %e,
                is_timeout = e.is_timeout(),
                is_connect = e.is_connect(),
                "HTTP request failed to provider"
            );
            AppError::Transport(e)
        })?;

    let status = response.status();
    tracing::debug!(
        provider = %upstream.provider,
        url = %upstream.url,
        status = %status,
        method = "POST",
        "HTTP request completed"
    );

    let bytes = response.bytes().await?;
    let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(
            provider = %upstream.provider,
            status = %status,
            error = %e,
            "Invalid JSON from provider"
        );
        AppError::UpstreamDecode(e)
    })?;

    if !status.is_success() {
        let message =
            extract_error_message(&body).unwrap_or_else(|| DEFAULT_UPSTREAM_ERROR.to_string());
        tracing::warn!(
            provider = %upstream.provider,
            status = %status,
            error = %message,
            "Provider returned error response"
        );
        return Err(AppError::Upstream {
            status: normalize_upstream_status(status),
            message,
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::Provider;
    use serde_json::json;

    fn openai_request(url: &str) -> UpstreamRequest {
        UpstreamRequest {
            provider: Provider::OpenAI,
            url: url.to_string(),
            auth: UpstreamAuth::Bearer("sk-test".to_string()),
            anthropic_version: None,
            body: json!({"model": "gpt-4"}),
        }
    }

    #[test]
    fn test_extract_error_message() {
        let body = json!({"error": {"message": "rate limited", "type": "rate_limit_error"}});
        assert_eq!(extract_error_message(&body), Some("rate limited".to_string()));
    }

    #[test]
    fn test_extract_error_message_missing() {
        assert_eq!(extract_error_message(&json!({})), None);
        assert_eq!(extract_error_message(&json!({"error": "plain string"})), None);
        assert_eq!(extract_error_message(&json!({"error": {"message": ""}})), None);
        assert_eq!(extract_error_message(&json!({"error": {"message": 42}})), None);
    }

    #[test]
    fn test_build_bearer_request() {
        let client = reqwest::Client::new();
        let request = build_upstream_request(&client, &openai_request("http://localhost/x"))
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "http://localhost/x");
        assert_eq!(request.headers()["authorization"], "Bearer sk-test");
        assert_eq!(request.headers()["content-type"], "application/json");
        assert!(request.headers().get("x-api-key").is_none());
        assert!(request.headers().get("anthropic-version").is_none());
    }

    #[test]
    fn test_build_anthropic_request() {
        let client = reqwest::Client::new();
        let upstream = UpstreamRequest {
            provider: Provider::Anthropic,
            url: "http://localhost/v1/messages".to_string(),
            auth: UpstreamAuth::XApiKey("ant-key".to_string()),
            anthropic_version: Some("2023-06-01"),
            body: json!({}),
        };
        let request = build_upstream_request(&client, &upstream).build().unwrap();

        assert_eq!(request.headers()["x-api-key"], "ant-key");
        assert_eq!(request.headers()["anthropic-version"], "2023-06-01");
        assert!(request.headers().get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_dispatch_connection_refused() {
        let client = reqwest::Client::new();
        let err = dispatch(&client, &openai_request("http://127.0.0.1:1/v1/chat/completions"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_normalize_upstream_status() {
        assert_eq!(
            normalize_upstream_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
