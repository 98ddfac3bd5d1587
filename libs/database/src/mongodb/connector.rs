use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Error type for MongoDB connection operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect to MongoDB and return a Client
///
/// # Example
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("printshop");
/// ```
pub async fn connect(url: &str) -> Result<Client, MongoError> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Connect using a MongoConfig
///
/// This is the recommended entry point when using configuration.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.url);

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    // Verify connection by listing databases (lightweight ping)
    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect to MongoDB with automatic retry on failure
///
/// Uses exponential backoff with jitter, which smooths over transient
/// network issues during startup.
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    let url_owned = url.to_string();

    match retry_config {
        Some(config) => retry_with_backoff(|| connect(&url_owned), config).await,
        None => retry(|| connect(&url_owned)).await,
    }
}

/// Connect from config with automatic retry on failure
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config_with_retry};
/// use database::common::RetryConfig;
///
/// let config = MongoConfig::from_env()?;
/// let retry_config = RetryConfig::new().with_max_retries(5);
/// let client = connect_from_config_with_retry(&config, Some(retry_config)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    let config_clone = config.clone();

    match retry_config {
        Some(retry_cfg) => {
            retry_with_backoff(|| connect_from_config(&config_clone), retry_cfg).await
        }
        None => retry(|| connect_from_config(&config_clone)).await,
    }
}
