use core_config::{ConfigError, FromEnv, env_or_default};

/// MongoDB database configuration
///
/// Can be constructed manually or loaded from environment variables.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Manual construction
/// let config = MongoConfig::new("mongodb://localhost:27017");
///
/// // With database name
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "printshop");
///
/// // From environment variables
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

const DEFAULT_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "printshop";

impl MongoConfig {
    /// Create a new MongoConfig with just a URL and the default database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Create a MongoConfig with a specific database name
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::new(url)
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (default: mongodb://localhost:27017)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (default: printshop)
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .unwrap_or_else(|_| DEFAULT_URL.to_string());

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        let max_pool_size = env_or_default("MONGODB_MAX_POOL_SIZE", "100")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "MONGODB_MAX_POOL_SIZE".to_string(),
                details: format!("{}", e),
            })?;

        let min_pool_size = env_or_default("MONGODB_MIN_POOL_SIZE", "5")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "MONGODB_MIN_POOL_SIZE".to_string(),
                details: format!("{}", e),
            })?;

        let connect_timeout_secs = env_or_default("MONGODB_CONNECT_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "MONGODB_CONNECT_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            })?;

        let server_selection_timeout_secs =
            env_or_default("MONGODB_SERVER_SELECTION_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: "MONGODB_SERVER_SELECTION_TIMEOUT_SECS".to_string(),
                    details: format!("{}", e),
                })?;

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size,
            min_pool_size,
            connect_timeout_secs,
            server_selection_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "printshop");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
    }

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "mydb");
    }

    #[test]
    fn test_mongo_config_with_app_name() {
        let config = MongoConfig::new("mongodb://localhost:27017").with_app_name("printshop-api");
        assert_eq!(config.app_name, Some("printshop-api".to_string()));
    }

    #[test]
    fn test_mongo_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", None),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "printshop");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_explicit() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://db:27017");
                assert_eq!(config.database, "testdb");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_fallback_vars() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_bad_pool_size() {
        temp_env::with_var("MONGODB_MAX_POOL_SIZE", Some("lots"), || {
            let result = MongoConfig::from_env();
            assert!(result.is_err());
            assert!(
                result
                    .unwrap_err()
                    .to_string()
                    .contains("MONGODB_MAX_POOL_SIZE")
            );
        });
    }
}
