//! Core functionality for the Nudge proxy server.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management
//! - Error handling
//! - Logging context
//! - HTTP middleware

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;

// Re-export commonly used types
pub use config::{AppConfig, ProviderCredentials, ProviderEndpoints, ServerConfig};
pub use error::{AppError, Result};
pub use logging::{generate_request_id, get_request_id};
pub use middleware::{cors_layer, request_id_middleware};
