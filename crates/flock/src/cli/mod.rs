//! Command implementations.

pub mod config;
pub mod housekeep;
pub mod run;
pub mod status;
pub mod types;

use flock_core::{Config, ConfigError};
use std::path::Path;

/// Load the config at `path`, or defaults if the file does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}
