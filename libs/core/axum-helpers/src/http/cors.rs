use axum::http::Method;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer restricted to an explicit origin list.
///
/// # Arguments
/// * `allowed_origins` - The allowed origin header values
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The specified allowed origins
/// - Common HTTP methods (GET, POST, PUT, DELETE, PATCH, OPTIONS)
/// - Common headers (Content-Type, Authorization, Accept)
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<axum::http::HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer.
///
/// Allows any origin. The storefront is served from the same process, so
/// cross-origin access is only needed for ad-hoc API consumers.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
