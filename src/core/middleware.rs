//! HTTP middleware for CORS and request ID tracking.

use crate::core::logging::{generate_request_id, REQUEST_ID};
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

/// Header used to propagate the request ID to and from clients.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// CORS policy for the chat API.
///
/// Any origin may call the API with `Content-Type`. Every `OPTIONS` request is
/// answered by the layer itself with an empty 200 carrying the allowed
/// methods and headers. Other responses, including errors, carry
/// `Access-Control-Allow-Origin: *`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Scope each request with a request ID.
///
/// An inbound `x-request-id` is reused when present, otherwise a new UUID is
/// generated. The ID is echoed back on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(generate_request_id);

    let mut response = REQUEST_ID
        .scope(request_id.clone(), next.run(request))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logging::get_request_id;
    use axum::{
        body::Body,
        http::StatusCode,
        middleware,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    fn header_list(response: &Response, name: &str) -> Vec<String> {
        response.headers()[name]
            .to_str()
            .unwrap()
            .split(',')
            .map(|v| v.trim().to_ascii_lowercase())
            .collect()
    }

    #[tokio::test]
    async fn test_cors_layer_answers_options() {
        async fn handler() -> &'static str {
            "unreachable"
        }

        let app = Router::new()
            .route("/", post(handler))
            .layer(cors_layer());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("OPTIONS")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            header_list(&response, "access-control-allow-methods"),
            vec!["get", "post", "options"]
        );
        assert_eq!(
            header_list(&response, "access-control-allow-headers"),
            vec!["content-type"]
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_cors_origin_on_error_responses() {
        async fn handler() -> StatusCode {
            StatusCode::NOT_FOUND
        }

        let app = Router::new()
            .route("/", get(handler))
            .layer(cors_layer());

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_request_id_reused_from_header() {
        async fn handler() -> String {
            get_request_id()
        }

        let app = Router::new()
            .route("/", get(handler))
            .layer(middleware::from_fn(request_id_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "client-id-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "client-id-1");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"client-id-1");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        async fn handler() -> &'static str {
            "ok"
        }

        let app = Router::new()
            .route("/", get(handler))
            .layer(middleware::from_fn(request_id_middleware));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert_eq!(id.len(), 36);
    }
}
