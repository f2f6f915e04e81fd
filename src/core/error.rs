//! Error types and handling for the Nudge proxy server.
//!
//! This module provides a unified error type [`AppError`] with one variant per
//! failure kind of the chat pipeline, and its conversion into the
//! `{"error": "<message>"}` HTTP response body.

use crate::services::provider::Provider;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request used a method other than POST or OPTIONS
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The credential for the resolved provider is not configured
    #[error("{} environment variable not set", .0.env_key_name())]
    MissingApiKey(Provider),

    /// The caller asked for a provider we do not support
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The inbound body is not valid JSON for a chat request
    #[error("{0}")]
    InvalidRequestBody(serde_json::Error),

    /// Network failure talking to the provider, or failure reading its body
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a body that is not JSON
    #[error("{0}")]
    UpstreamDecode(serde_json::Error),

    /// The provider answered with a non-success status
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
}

impl AppError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream { status, .. } => *status,
            AppError::MissingApiKey(_)
            | AppError::UnsupportedProvider(_)
            | AppError::InvalidRequestBody(_)
            | AppError::Transport(_)
            | AppError::UpstreamDecode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
