//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes used across the application.
//! Each code carries:
//! - a string identifier for client consumption (e.g., "VALIDATION_ERROR")
//! - an integer code for logging and monitoring (e.g., 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in a path or query parameter
    InvalidUuid,

    /// JSON extraction from the request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database connection or query error
    DatabaseError,

    // I/O errors (4000s)
    /// File system I/O error
    IoError,

    // Serialization errors (5000s)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// String identifier for client consumption.
    ///
    /// SCREAMING_SNAKE_CASE so clients can switch on the value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// Ranges: 1000-1999 client errors, 2000-2999 database errors,
    /// 4000-4999 I/O errors, 5000-5999 serialization errors.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::UnprocessableEntity => 1009,
            Self::ServiceUnavailable => 1011,
            Self::DatabaseError => 2003,
            Self::IoError => 4001,
            Self::SerdeJsonError => 5001,
        }
    }

    /// Default user-facing message for this error type.
    ///
    /// Individual handlers can override with a more specific message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse JSON request body",
            Self::NotFound => "The requested resource was not found",
            Self::Conflict => "Request conflicts with the current resource state",
            Self::UnprocessableEntity => "Request could not be processed",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "A database error occurred",
            Self::IoError => "An I/O error occurred",
            Self::SerdeJsonError => "Failed to serialize or deserialize JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_identifiers() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
    }

    #[test]
    fn test_integer_codes_are_stable() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    }
}
