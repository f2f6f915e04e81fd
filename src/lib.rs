//! Nudge Proxy - a small HTTP proxy in front of the Anthropic and OpenAI chat APIs
//!
//! A client application posts a chat message. The proxy picks a provider,
//! injects the fixed "Nudge" system prompt plus optional date/time/location
//! context, calls the provider and relays its JSON response (or error) back.
//! Provider credentials never leave the server.
//!
//! # Architecture
//!
//! - [`core`]: Configuration, errors, logging context, middleware
//! - [`api`]: HTTP handlers, request models, routing, upstream dispatch
//! - [`services`]: Provider selection and prompt construction
//!
//! # Configuration
//!
//! At least one of these environment variables should be set:
//! - `ANTHROPIC_API_KEY`: Anthropic API key (preferred provider when set)
//! - `OPENAI_API_KEY`: OpenAI API key
//!
//! Optional environment variables:
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `VERIFY_SSL`: Verify SSL certificates for upstream (default: true)
//! - `REQUEST_TIMEOUT_SECS`: Upstream request timeout in seconds (default: 60)
//! - `ANTHROPIC_API_BASE` / `OPENAI_API_BASE`: Override provider base URLs

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use api::{build_router, AppState, ChatRequest};
pub use self::core::{AppConfig, AppError, Result};
pub use services::Provider;
