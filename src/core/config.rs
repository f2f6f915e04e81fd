//! Configuration management for the Nudge proxy server.
//!
//! Configuration is read once from the process environment at startup and
//! injected into the handler state. Handlers never touch the environment
//! directly, which keeps provider selection deterministic under test.

use anyhow::{Context, Result};
use serde::Serialize;

/// Main application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Server configuration (host, port)
    pub server: ServerConfig,

    /// Whether to verify SSL certificates for upstream requests
    pub verify_ssl: bool,

    /// Request timeout in seconds for upstream providers
    pub request_timeout_secs: u64,

    /// Provider API keys
    #[serde(skip_serializing)]
    pub credentials: ProviderCredentials,

    /// Provider base URLs
    pub endpoints: ProviderEndpoints,
}

/// API keys for the two supported providers.
///
/// An empty value is treated the same as an unset one.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// Base URLs for the upstream provider APIs.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderEndpoints {
    pub anthropic_api_base: String,

    pub openai_api_base: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            anthropic_api_base: default_anthropic_api_base(),
            openai_api_base: default_openai_api_base(),
        }
    }
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_verify_ssl() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    60
}

fn default_anthropic_api_base() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            verify_ssl: default_verify_ssl(),
            request_timeout_secs: default_request_timeout(),
            credentials: ProviderCredentials::default(),
            endpoints: ProviderEndpoints::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use nudge_proxy::core::config::AppConfig;
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "OPENAI_API_KEY" => Some("sk-test".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert!(config.credentials.anthropic_api_key.is_none());
    /// assert_eq!(config.credentials.openai_api_key.as_deref(), Some("sk-test"));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        config.credentials.anthropic_api_key = non_empty(lookup("ANTHROPIC_API_KEY"));
        config.credentials.openai_api_key = non_empty(lookup("OPENAI_API_KEY"));

        if let Some(host) = non_empty(lookup("HOST")) {
            config.server.host = host;
        }

        if let Some(port_str) = non_empty(lookup("PORT")) {
            config.server.port = port_str
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", port_str))?;
        }

        if let Some(verify_ssl_str) = non_empty(lookup("VERIFY_SSL")) {
            config.verify_ssl = str_to_bool(&verify_ssl_str);
        }

        if let Some(timeout_str) = non_empty(lookup("REQUEST_TIMEOUT_SECS")) {
            config.request_timeout_secs = timeout_str
                .parse::<u64>()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECS value: {}", timeout_str))?;
        }

        if let Some(base) = non_empty(lookup("ANTHROPIC_API_BASE")) {
            config.endpoints.anthropic_api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(base) = non_empty(lookup("OPENAI_API_BASE")) {
            config.endpoints.openai_api_base = base.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Convert string to boolean.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive)
fn str_to_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
