//! Error types for Flock.
//!
//! Errors are organized by stage so that a failed run says which step broke
//! (fetching, applying, persisting) and carries the path or URL involved.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown to the user when no wallpaper could be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to reach the wallpaper service. \
     Check your internet connection or try again later.";

/// Top-level error type for Flock operations.
#[derive(Error, Debug)]
pub enum FlockError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Retrieval failed; the run cannot continue without an image
    #[error("{msg} ({0})", msg = FETCH_FAILED_MESSAGE)]
    Fetch(#[from] FetchError),

    /// The desktop collaborator refused the new wallpaper
    #[error("Desktop error: {0}")]
    Desktop(#[from] DesktopError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while fetching a wallpaper from the remote source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, DNS, TLS or request timeout failure
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The source answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not describe a photo
    #[error("Unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    /// Streaming the image body failed
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// Every candidate offered was smaller than the screen
    #[error("No photo of at least {min_width}x{min_height} after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        min_width: u32,
        min_height: u32,
    },

    /// The whole fetch exceeded its deadline
    #[error("Fetch timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Writing the downloaded image failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A housekeeping pass hit an I/O error. Deletions made before the error stay.
#[derive(Error, Debug)]
#[error("Housekeeping failed at {path}: {source}")]
pub struct HousekeepingError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// An image could not be decoded for fingerprinting.
#[derive(Error, Debug)]
#[error("Cannot fingerprint image: {message}")]
pub struct FingerprintError {
    pub message: String,
}

/// Errors from the desktop collaborator.
#[derive(Error, Debug)]
pub enum DesktopError {
    /// No command configured for this operation
    #[error("No {0} command configured (see [desktop] in config.toml)")]
    NotConfigured(&'static str),

    /// The command could not be started
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The current-wallpaper command printed nothing
    #[error("`{0}` did not report a wallpaper path")]
    EmptyOutput(String),
}

/// Convenience type alias for Flock results.
pub type Result<T> = std::result::Result<T, FlockError>;

/// Convenience type alias for retrieval results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
