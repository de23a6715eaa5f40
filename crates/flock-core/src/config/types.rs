//! Sub-configuration structs with their defaults.

use crate::types::WallpaperStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote photo source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the photo API
    pub base_url: String,

    /// Path of the random-photo endpoint, relative to `base_url`
    pub random_photos_path: String,

    /// API access key (supports ${ENV_VAR} syntax)
    pub auth_key: String,

    /// Requested photo orientation
    pub orientation: String,

    /// Timeout for each API call in milliseconds (image downloads are bounded
    /// by `retrieval.timeout_ms` instead)
    pub request_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com/".to_string(),
            random_photos_path: "photos/random".to_string(),
            auth_key: "${UNSPLASH_ACCESS_KEY}".to_string(),
            orientation: "landscape".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl SourceConfig {
    /// Full URL of the random-photo endpoint.
    pub fn random_photos_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.random_photos_path.trim_start_matches('/')
        )
    }
}

/// Bounds on the fetch-until-big-enough loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of candidates requested before giving up
    pub max_attempts: u32,

    /// Deadline for the whole fetch (all attempts plus download) in milliseconds
    pub timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            timeout_ms: 120_000,
        }
    }
}

/// Local image cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory downloaded wallpapers are stored in
    pub dir: PathBuf,

    /// Number of images kept after housekeeping
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("~/.flock/cache"),
            max_entries: 20,
        }
    }
}

/// Screen resolution a photo must meet or exceed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Minimum width in pixels
    pub width: u32,

    /// Minimum height in pixels
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Desktop integration settings.
///
/// Commands are argv lists. `{path}` and `{style}` are substituted in every
/// argument, e.g. `["feh", "--bg-{style}", "{path}"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// How the wallpaper is laid out on screen
    pub style: WallpaperStyle,

    /// Where the record of the current wallpaper is written
    pub metadata_path: PathBuf,

    /// Command that applies an image as the desktop background
    pub apply_command: Vec<String>,

    /// Command that prints the path of the current desktop background
    pub current_command: Vec<String>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            style: WallpaperStyle::Fill,
            metadata_path: PathBuf::from("~/.flock/author.json"),
            apply_command: Vec::new(),
            current_command: Vec::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
