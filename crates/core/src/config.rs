//! Serializer configuration via `stratalog.toml`
//!
//! The only tunable today is the memory pool used by the convenience entry
//! points. A missing file means defaults; a present file is validated
//! eagerly so that a typo fails at startup rather than at the first logged
//! value.

use crate::memory::{install_default_pool, MemoryPool, DEFAULT_POOL_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "stratalog.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("Failed to access config file '{path}': {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// The file parsed but a value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Serializing the config to TOML failed
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A process-wide pool already exists
    #[error("Default memory pool already initialized")]
    PoolAlreadyInstalled,
}

/// Memory pool section (`[pool]`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolConfig {
    /// Pool name reported in allocation errors
    #[serde(default = "default_pool_name")]
    pub name: String,
    /// Maximum bytes held by in-flight builders; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_bytes: Option<usize>,
}

fn default_pool_name() -> String {
    DEFAULT_POOL_NAME.to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: default_pool_name(),
            capacity_bytes: None,
        }
    }
}

/// Configuration loaded from `stratalog.toml`.
///
/// # Example
///
/// ```toml
/// [pool]
/// name = "default"
/// # capacity_bytes = 268435456
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StratalogConfig {
    /// Memory pool settings
    #[serde(default)]
    pub pool: PoolConfig,
}

impl StratalogConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# StrataLog serializer configuration

[pool]
# Name reported in allocation errors.
name = "default"

# Upper bound on bytes held by in-flight array builders.
# Leave commented out for an unbounded pool.
# capacity_bytes = 268435456
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StratalogConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse(msg) => {
                ConfigError::Parse(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if `pool.capacity_bytes` is zero or the pool name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.name.trim().is_empty() {
            return Err(ConfigError::Invalid("pool.name must not be empty".to_string()));
        }
        if self.pool.capacity_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "pool.capacity_bytes must be > 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a memory pool from this config
    pub fn memory_pool(&self) -> MemoryPool {
        MemoryPool::from_config(&self.pool)
    }

    /// Install the configured pool as the process-wide default.
    ///
    /// # Errors
    ///
    /// Returns `PoolAlreadyInstalled` if a default pool already exists.
    pub fn install(&self) -> Result<(), ConfigError> {
        install_default_pool(self.memory_pool()).map_err(|_| ConfigError::PoolAlreadyInstalled)
    }
}
