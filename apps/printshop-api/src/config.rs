use std::path::PathBuf;

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// MongoDB config comes from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration.
/// Composes shared config components from the `core_config` library.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    /// Directory the static storefront is served from
    pub static_dir: PathBuf,
    pub environment: Environment,
}

/// Default storefront directory: the crate's own `public/`, so `cargo run`
/// works from any working directory. Deployments override with STATIC_DIR.
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let static_dir = PathBuf::from(env_or_default("STATIC_DIR", DEFAULT_STATIC_DIR));

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            static_dir,
            environment,
        })
    }
}
