use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// Used as the router fallback for requests that match no route (and no
/// static file).
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        code: ErrorCode::NotFound.code(),
        error: ErrorCode::NotFound.as_str().to_string(),
        message: ErrorCode::NotFound.default_message().to_string(),
        details: None,
    });

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse {
        code: ErrorCode::NotFound.code(),
        error: "METHOD_NOT_ALLOWED".to_string(),
        message: "The HTTP method is not allowed for this resource".to_string(),
        details: None,
    });

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
