//! API layer for the Nudge proxy server.
//!
//! This module contains the HTTP handlers, the inbound request models,
//! the route table and the outbound provider call.

pub mod handlers;
pub mod models;
pub mod router;
pub mod upstream;

// Re-export commonly used types
pub use handlers::{chat, health, AppState};
pub use models::{ChatMessage, ChatRequest, Location, RequestContext};
pub use router::{build_router, CHAT_PATH};
