//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to read criteria file {}: {source}", path.display())]
    CriteriaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid criteria file {}: {source}", path.display())]
    CriteriaParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Criteria file not found: {}", .0.display())]
    CriteriaFileNotFound(PathBuf),
}
