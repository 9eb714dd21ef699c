//! Criteria catalog configuration

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ValidationError};
use crate::domain::membership::CriteriaCatalog;

/// Where the tier criteria come from
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CriteriaConfig {
    /// YAML catalog replacing the built-in criteria. None = built-in.
    pub path: Option<PathBuf>,
}

impl CriteriaConfig {
    /// Validate criteria configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if !path.is_file() => {
                Err(ValidationError::CriteriaFileNotFound(path.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Replace the configured path when `path` is given
    pub fn with_override(self, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self { path: Some(path) },
            None => self,
        }
    }

    /// Load the configured catalog, falling back to the built-in criteria
    pub fn load_catalog(&self) -> Result<CriteriaCatalog, ConfigError> {
        match &self.path {
            Some(path) => read_catalog(path),
            None => Ok(CriteriaCatalog::standard().clone()),
        }
    }
}

/// Read and validate a YAML criteria catalog
pub fn read_catalog(path: &Path) -> Result<CriteriaCatalog, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::CriteriaRead {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog: CriteriaCatalog =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::CriteriaParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "loaded criteria catalog");
    Ok(catalog)
}
