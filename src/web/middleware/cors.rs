//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer from the configured origins.
///
/// With no (valid) origins any origin is allowed, which suits local use of
/// the browser UI from a dev server.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::util::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    async fn allow_origin_for(origins: &[String], origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/", get(dummy_handler))
            .layer(create_cors_layer(origins));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("Origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_cors_any_origin_when_unconfigured() {
        let allowed = allow_origin_for(&[], "http://example.com").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_cors_configured_origin() {
        let origins = vec!["http://localhost:5173".to_string()];

        let allowed = allow_origin_for(&origins, "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));

        let denied = allow_origin_for(&origins, "http://evil.example").await;
        assert!(denied.is_none());
    }
}
