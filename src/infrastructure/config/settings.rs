//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; `TRACKWELL_DATABASE_URL`
//! overrides the database location so deployments can keep it out of the file.
//!
//! # Example
//!
//! ```no_run
//! use trackwell::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::cache::{CacheConfig, PermissionsConfig, MAX_REFRESH_DELAY_SECS};
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[database].url`.
pub const DATABASE_URL_ENV: &str = "TRACKWELL_DATABASE_URL";

/// Main application configuration.
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Store location and write statements.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Device identity cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Permission index settings.
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            config.database.url = url;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "url" }.into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.device_refresh_delay_secs > MAX_REFRESH_DELAY_SECS {
            return Err(ConfigError::InvalidValue {
                field: "device_refresh_delay_secs",
                reason: format!("must be at most {MAX_REFRESH_DELAY_SECS}"),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }
}
