//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and static file serving
//! - Health endpoints
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! // Create router with API documentation and a storefront directory
//! let router = create_router::<ApiDoc>(api_routes, Some("public".as_ref())).await?;
//!
//! // Add health endpoints
//! let app = router.merge(health_router(app_info!()));
//!
//! // Start server with graceful shutdown
//! create_app(app, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
