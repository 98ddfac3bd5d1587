//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the printshop Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, None).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_production_app, create_router,
    health_router, shutdown_signal,
};
