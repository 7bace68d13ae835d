use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_QUOTE_COLLECTION: &str = "solar_quotes";
pub const DEFAULT_WORKSHOP_COLLECTION: &str = "workshops";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Username and password, set together or not at all.
#[derive(Clone, PartialEq, Eq)]
pub struct MongoCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for MongoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Settings read by the quote and workshop repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub credentials: Option<MongoCredentials>,
    pub quote_collection: String,
    pub workshop_collection: String,
    pub pool_size: u32,
    pub connect_timeout: Duration,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), `MONGO_USERNAME` /
    /// `MONGO_PASSWORD`, `MONGO_QUOTE_COLLECTION`, `MONGO_WORKSHOP_COLLECTION`,
    /// `MONGO_POOL_SIZE` and `MONGO_CONNECTION_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| ConfigError::EnvVarNotFound(key.to_string()));
        let collection = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                debug!("{} not set, using {}", key, default);
                default.to_string()
            })
        };

        let credentials = match (lookup("MONGO_USERNAME"), lookup("MONGO_PASSWORD")) {
            (Some(username), Some(password)) => Some(MongoCredentials { username, password }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::ValidationError(
                    "MONGO_USERNAME and MONGO_PASSWORD must be set together".to_string(),
                ))
            }
        };

        let pool_size = match lookup("MONGO_POOL_SIZE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid MONGO_POOL_SIZE value: {}", raw)))?,
            None => DEFAULT_POOL_SIZE,
        };
        let timeout_secs = match lookup("MONGO_CONNECTION_TIMEOUT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid MONGO_CONNECTION_TIMEOUT value: {}", raw)))?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        let config = MongoConfig {
            uri: required("MONGO_URI")?,
            database: required("MONGO_DATABASE")?,
            credentials,
            quote_collection: collection("MONGO_QUOTE_COLLECTION", DEFAULT_QUOTE_COLLECTION),
            workshop_collection: collection("MONGO_WORKSHOP_COLLECTION", DEFAULT_WORKSHOP_COLLECTION),
            pool_size,
            connect_timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;

        if config.credentials.is_none() {
            warn!("MongoDB credentials not set, connecting without authentication");
        }
        info!(
            database = %config.database,
            quotes = %config.quote_collection,
            workshops = %config.workshop_collection,
            "MongoDB configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

        if self.uri.trim().is_empty() {
            return invalid("MongoDB URI cannot be empty");
        }
        if self.database.trim().is_empty() {
            return invalid("MongoDB database cannot be empty");
        }
        if self.quote_collection.trim().is_empty() || self.workshop_collection.trim().is_empty() {
            return invalid("MongoDB collection names cannot be empty");
        }
        if self.quote_collection == self.workshop_collection {
            return invalid("Quotes and workshops need separate collections");
        }
        if self.pool_size == 0 {
            return invalid("MongoDB pool size must be greater than 0");
        }
        if self.connect_timeout.is_zero() {
            return invalid("MongoDB connection timeout must be greater than 0");
        }
        if let Some(creds) = &self.credentials {
            if creds.username.is_empty() || creds.password.is_empty() {
                return invalid("MongoDB username and password cannot be empty");
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "solar".to_string(),
            credentials: None,
            quote_collection: DEFAULT_QUOTE_COLLECTION.to_string(),
            workshop_collection: DEFAULT_WORKSHOP_COLLECTION.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}
