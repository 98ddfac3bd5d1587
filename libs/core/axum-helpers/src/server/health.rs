use axum::{Json, Router, extract::State, http::StatusCode, response::{IntoResponse, Response}, routing::get};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response: the process is up and serving.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Health check endpoint handler.
///
/// Always returns 200 while the service is running, with the app name and
/// version from `AppInfo`.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the /health endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = api_router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app)
}
