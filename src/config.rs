use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub filter: FilterRules,
    pub paging: PagingRules,
}

/// Bracket nesting accepted when no config file sets `[filter] max_depth`
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    /// Longest filter text accepted, in characters
    pub max_length: usize,
    /// Deepest bracket nesting accepted
    pub max_depth: usize,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            max_length: 2048,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingRules {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PagingRules {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<QueryConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<QueryConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let config = toml::from_str::<QueryConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })?;
    tracing::debug!(path = %path.display(), "Config loaded");
    Ok(config)
}

pub fn default_config() -> &'static QueryConfig {
    static DEFAULT_CONFIG: LazyLock<QueryConfig> = LazyLock::new(QueryConfig::default);
    &DEFAULT_CONFIG
}
