//! Route table and middleware stack.

use crate::api::handlers::{chat, health, method_not_allowed, AppState};
use crate::core::middleware::{cors_layer, request_id_middleware};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Path the chat handler is mounted on.
pub const CHAT_PATH: &str = "/api/chat";

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    // OPTIONS never reaches the method router; the CORS layer answers it.
    let chat_route = post(chat).fallback(method_not_allowed);

    Router::new()
        .route(CHAT_PATH, chat_route)
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
