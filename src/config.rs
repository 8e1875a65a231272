//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants
//! for default paths, logging, and query limits. `AppConfig` is the root
//! configuration struct containing all settings.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "countyhealth=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Default table to query when the config does not name one
pub const DEFAULT_TABLE: &str = "county_health_rankings";

/// Rows returned per lookup when the request does not specify a limit
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Cache-Control for API responses: lookups are cheap and the dataset may
/// be reloaded between requests, so intermediaries must not cache.
pub const CACHE_CONTROL_API: &str = "no-store";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// SQLite database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// SQLite database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file produced by the loader
    pub path: PathBuf,
    /// Table holding the health rankings rows
    #[serde(default = "DatabaseConfig::default_table")]
    pub table: String,
}

impl DatabaseConfig {
    fn default_table() -> String {
        DEFAULT_TABLE.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // The table name is interpolated into SQL (identifiers cannot be
        // bound as parameters), so it must be a plain identifier.
        if !is_sql_identifier(&self.database.table) {
            return Err(ConfigError::Validation(format!(
                "database.table {:?} is not a valid SQL identifier",
                self.database.table
            )));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got {:?}",
                other
            ))),
        }
    }
}

/// Whether `name` can be safely used as an SQL identifier:
/// a letter or underscore followed by letters, digits, or underscores.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
