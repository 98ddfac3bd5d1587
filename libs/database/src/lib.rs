//! MongoDB connectivity for the printshop services.
//!
//! This library owns connection management: configuration, connect with
//! retry, and health checks. Domain crates receive a [`mongodb::Database`]
//! handle from here and never construct clients themselves.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "printshop");
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
