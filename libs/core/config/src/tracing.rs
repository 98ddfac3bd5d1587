use crate::Environment;
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main(), before any fallible operations, so startup
/// errors get colored reports. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration.
///
/// - **Production** (`APP_ENV=production`): JSON format for log aggregation,
///   module targets hidden, events flattened.
/// - **Development** (default): pretty-printed, human-readable output.
///
/// Both modes install an ErrorLayer so errors carry span traces.
///
/// Environment variables:
/// - `APP_ENV`: set to "production" for JSON logs (default: "development")
/// - `RUST_LOG`: override log levels (e.g. "debug", "printshop_api=trace")
///
/// Safe to call multiple times; re-initialization is silently skipped
/// (common in tests).
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,tower_http=info,mongodb=warn")
        } else {
            EnvFilter::new("debug,tower_http=debug")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if result.is_err() {
        debug!("Tracing already initialized, skipping re-initialization");
    }
}
