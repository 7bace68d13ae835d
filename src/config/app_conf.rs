use std::env;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::config::ConfigError;

/// Where quotes and workshops are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStoreKind {
    Mongo,
    Memory,
}

impl FromStr for DataStoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(DataStoreKind::Mongo),
            "memory" => Ok(DataStoreKind::Memory),
            other => Err(ConfigError::InvalidValue(format!("Unknown DATA_STORE value: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_store: DataStoreKind,
    /// JSON file of workshops loaded by the in-memory store.
    pub workshops_file: Option<String>,
    /// Idle time after which an unfinished wizard session is dropped.
    pub session_idle_secs: u64,
    pub max_wizard_sessions: usize,
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::ParseError(format!("Invalid {} value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = parse_var("APP_PORT", 8080)?;
        let data_store = match env::var("DATA_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => {
                warn!("DATA_STORE not set, using default: mongo");
                DataStoreKind::Mongo
            }
        };
        let workshops_file = env::var("WORKSHOPS_FILE").ok().filter(|path| !path.trim().is_empty());
        if data_store == DataStoreKind::Memory && workshops_file.is_none() {
            warn!("WORKSHOPS_FILE not set, the in-memory store starts without workshops");
        }
        let session_idle_secs: u64 = parse_var("WIZARD_SESSION_IDLE_SECS", 30 * 60)?;
        let max_wizard_sessions: usize = parse_var("WIZARD_MAX_SESSIONS", 10_000)?;
        if session_idle_secs == 0 || max_wizard_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "WIZARD_SESSION_IDLE_SECS and WIZARD_MAX_SESSIONS must be greater than 0".to_string(),
            ));
        }

        debug!(host = %host, port, ?data_store, ?workshops_file, session_idle_secs, max_wizard_sessions, "Application configuration loaded");
        Ok(AppConfig { host, port, data_store, workshops_file, session_idle_secs, max_wizard_sessions })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_store: DataStoreKind::Mongo,
            workshops_file: None,
            session_idle_secs: 30 * 60,
            max_wizard_sessions: 10_000,
        }
    }
}
