use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Order {0} was modified concurrently")]
    Conflict(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Convert OrderError to AppError for standardized error responses
impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::Conflict(id) => AppError::Conflict(format!(
                "Order {} was modified concurrently, retry the edit",
                id
            )),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}
