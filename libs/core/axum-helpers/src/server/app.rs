use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::cors::{create_cors_layer, create_permissive_cors_layer};
use crate::http::security::security_headers;
use axum::handler::HandlerWithoutStateExt;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::path::Path;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind to the configured
/// address or the server errors during operation.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let router = Router::new();
///     let config = ServerConfig::default();
///     create_app(router, &config).await?;
///     Ok(())
/// }
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes merged at the root
/// - Static file serving for the storefront (when `static_dir` is given),
///   with the JSON 404 handler behind it for non-file misses
/// - Common middleware (tracing, security headers, CORS, compression)
///
/// # CORS Configuration
///
/// CORS is permissive by default. Set `CORS_ALLOWED_ORIGIN` with
/// comma-separated origins to restrict:
/// - `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://example.com`
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Arguments
/// * `apis` - Router with all routes (state already applied per route)
/// * `static_dir` - Optional directory to serve static storefront files from
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but contains invalid or
/// empty values.
pub async fn create_router<T>(apis: Router, static_dir: Option<&Path>) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis);

    // The storefront is the fallback: anything that is not an API route is
    // looked up on disk, and misses get the structured JSON 404.
    let router = match static_dir {
        Some(dir) => {
            info!("Serving storefront from {}", dir.display());
            router.fallback_service(
                ServeDir::new(dir).not_found_service(not_found.into_service()),
            )
        }
        None => router.fallback(not_found),
    };

    let cors_layer = cors_layer_from_env()?;

    Ok(router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        // Compress responses based on the Accept-Encoding header
        .layer(CompressionLayer::new()))
}

/// Builds the CORS layer: an explicit origin list when `CORS_ALLOWED_ORIGIN`
/// is set, permissive otherwise.
fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let origins_str = match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(value) => value,
        Err(_) => {
            info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            return Ok(create_permissive_cors_layer());
        }
    };

    let allowed_origins: Vec<axum::http::HeaderValue> = origins_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<axum::http::HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(create_cors_layer(allowed_origins))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Provides graceful shutdown with a bounded cleanup window for database
/// connections and the like.
///
/// # Arguments
/// * `router` - The configured Axum router
/// * `server_config` - Server configuration
/// * `shutdown_timeout` - Maximum time to wait for cleanup (recommended: 30s)
/// * `cleanup` - Async cleanup function for database connections, etc.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// let cleanup = async move {
///     drop(mongo_client);
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    // Cleanup runs once shutdown is signaled, bounded by the timeout
    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        let cleanup_result = tokio::time::timeout(shutdown_timeout, cleanup).await;

        match cleanup_result {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}
