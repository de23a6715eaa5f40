//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.base_url must not be empty".into(),
            ));
        }
        if self.source.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "source.request_timeout_ms must be > 0".into(),
            ));
        }
        if self.retrieval.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.max_attempts must be > 0".into(),
            ));
        }
        if self.retrieval.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.timeout_ms must be > 0".into(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "cache.max_entries must be > 0".into(),
            ));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ConfigError::ValidationError(
                "screen.width and screen.height must be > 0".into(),
            ));
        }
        Ok(())
    }
}
