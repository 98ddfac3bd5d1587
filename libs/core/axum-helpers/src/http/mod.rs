//! HTTP middleware module.
//!
//! HTTP-level middleware for CORS configuration and security headers.

pub mod cors;
pub mod security;

// Re-export commonly used functions
pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
