//! Configuration management for Flock.
//!
//! Configuration is loaded from `config.toml` in the platform config directory
//! (falling back to `~/.flock/config.toml`). Every section has defaults, so an
//! empty or missing file yields a working setup apart from the API key.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Flock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote photo source
    pub source: SourceConfig,

    /// Retry and deadline policy for retrieval
    pub retrieval: RetrievalConfig,

    /// Local image cache
    pub cache: CacheConfig,

    /// Minimum acceptable photo size
    pub screen: ScreenConfig,

    /// Desktop integration and metadata location
    pub desktop: DesktopConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.flock.flock/config.toml
    /// - Linux: ~/.config/flock/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\flock\flock\config\config.toml
    ///
    /// Falls back to ~/.flock/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "flock", "flock")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".flock").join("config.toml")
            })
    }

    /// Get the resolved cache directory path (with ~ expansion).
    pub fn cache_dir(&self) -> PathBuf {
        expand_path(&self.cache.dir)
    }

    /// Get the resolved metadata file path (with ~ expansion).
    pub fn metadata_path(&self) -> PathBuf {
        expand_path(&self.desktop.metadata_path)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Returns `None` for an empty value or an unset variable.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
