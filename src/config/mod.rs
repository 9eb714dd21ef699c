//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REALTY_MEMBERSHIP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use realty_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let catalog = config.criteria.load_catalog().expect("Invalid criteria");
//! ```

mod criteria;
mod error;
mod telemetry;

pub use criteria::{read_catalog, CriteriaConfig};
pub use error::{ConfigError, ValidationError};
pub use telemetry::{LogFormat, TelemetryConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Tier criteria source
    #[serde(default)]
    pub criteria: CriteriaConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REALTY_MEMBERSHIP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `REALTY_MEMBERSHIP__TELEMETRY__LOG_LEVEL=debug` -> `telemetry.log_level = debug`
    /// - `REALTY_MEMBERSHIP__CRITERIA__PATH=/etc/criteria.yaml` -> `criteria.path = ...`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REALTY_MEMBERSHIP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.telemetry.validate()?;
        self.criteria.validate()?;
        Ok(())
    }
}
