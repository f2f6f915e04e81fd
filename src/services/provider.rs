//! Provider selection and provider-specific request building.
//!
//! The two supported providers are a closed enum. Each variant knows its
//! endpoint, authentication scheme and body layout, and every branch on the
//! provider is an exhaustive `match`.

use crate::api::models::ChatMessage;
use crate::core::config::{ProviderCredentials, ProviderEndpoints};
use crate::core::{AppError, Result};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

pub const ANTHROPIC_MESSAGES_PATH: &str = "/v1/messages";
pub const OPENAI_CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub const ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const OPENAI_MODEL: &str = "gpt-4";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Response length cap applied to both providers.
pub const MAX_TOKENS: u32 = 200;

/// Upstream LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub const fn as_str(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAI => "openai",
        }
    }

    /// Name of the environment variable holding this provider's API key.
    pub const fn env_key_name(self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Look up this provider's API key.
    pub fn api_key(self, credentials: &ProviderCredentials) -> Result<&str> {
        let key = match self {
            Provider::Anthropic => credentials.anthropic_api_key.as_deref(),
            Provider::OpenAI => credentials.openai_api_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
            .ok_or(AppError::MissingApiKey(self))
    }

    /// Build the outbound request for this provider.
    ///
    /// Anthropic receives `history` whenever it is present, even if empty.
    /// OpenAI only uses a non-empty `history`. Otherwise a single user
    /// message carrying `message` is sent.
    pub fn build_request(
        self,
        endpoints: &ProviderEndpoints,
        api_key: &str,
        system_prompt: &str,
        history: Option<&[ChatMessage]>,
        message: &str,
    ) -> UpstreamRequest {
        match self {
            Provider::Anthropic => {
                let messages = match history {
                    Some(history) => history.to_vec(),
                    None => vec![ChatMessage::user(message)],
                };
                UpstreamRequest {
                    provider: self,
                    url: format!("{}{}", endpoints.anthropic_api_base, ANTHROPIC_MESSAGES_PATH),
                    auth: UpstreamAuth::XApiKey(api_key.to_string()),
                    anthropic_version: Some(ANTHROPIC_VERSION),
                    body: json!({
                        "model": ANTHROPIC_MODEL,
                        "max_tokens": MAX_TOKENS,
                        "system": system_prompt,
                        "messages": messages,
                    }),
                }
            }
            Provider::OpenAI => {
                let mut messages = vec![ChatMessage::system(system_prompt)];
                match history {
                    Some(history) if !history.is_empty() => messages.extend_from_slice(history),
                    _ => messages.push(ChatMessage::user(message)),
                }
                UpstreamRequest {
                    provider: self,
                    url: format!(
                        "{}{}",
                        endpoints.openai_api_base, OPENAI_CHAT_COMPLETIONS_PATH
                    ),
                    auth: UpstreamAuth::Bearer(api_key.to_string()),
                    anthropic_version: None,
                    body: json!({
                        "model": OPENAI_MODEL,
                        "max_tokens": MAX_TOKENS,
                        "messages": messages,
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            other => Err(AppError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Resolve the provider for a request.
///
/// An explicit (non-empty) provider name wins. Otherwise Anthropic is used
/// when its key is configured, and OpenAI when it is not.
pub fn resolve_provider(
    requested: Option<&str>,
    credentials: &ProviderCredentials,
) -> Result<Provider> {
    match requested.filter(|p| !p.is_empty()) {
        Some(name) => name.parse(),
        None if Provider::Anthropic.api_key(credentials).is_ok() => Ok(Provider::Anthropic),
        None => Ok(Provider::OpenAI),
    }
}

/// Authentication mode for the upstream provider request.
#[derive(Clone, PartialEq, Eq)]
pub enum UpstreamAuth {
    Bearer(String),
    XApiKey(String),
}

impl fmt::Debug for UpstreamAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAuth::Bearer(_) => f.write_str("Bearer(***)"),
            UpstreamAuth::XApiKey(_) => f.write_str("XApiKey(***)"),
        }
    }
}

/// Fully built outbound request: target, auth headers and JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub provider: Provider,
    pub url: String,
    pub auth: UpstreamAuth,
    pub anthropic_version: Option<&'static str>,
    pub body: Value,
}
