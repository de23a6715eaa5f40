//! Flock Core - fresh photo wallpapers with a bounded local cache.
//!
//! Flock fetches a random landscape photo at least as large as the screen,
//! stores it in a local cache, hands it to the desktop, remembers who took it,
//! and keeps the cache free of duplicates and old entries.
//!
//! # Architecture
//!
//! ```text
//! PhotoSource → Retriever → Desktop::apply → MetadataStore → Housekeeper
//! ```
//!
//! The remote source and the desktop are traits, so the pipeline runs the
//! same against Unsplash and a real desktop as it does against test doubles.
//!
//! # Usage
//!
//! ```rust,ignore
//! use flock_core::{Config, Flock};
//!
//! #[tokio::main]
//! async fn main() -> flock_core::Result<()> {
//!     let flock = Flock::new(Config::load()?);
//!     let outcome = flock.run_once().await?;
//!     println!("Photo by {}", outcome.record.author);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod desktop;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use desktop::{CommandDesktop, Desktop};
pub use error::{ConfigError, DesktopError, FetchError, FlockError, HousekeepingError, Result};
pub use pipeline::{HousekeepingReport, OwnershipChecker, RunOutcome, WallpaperProcessor};
pub use source::{PhotoSource, UnsplashSource};
pub use types::{ImageRecord, WallpaperStyle};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flock - the main entry point, wired from a [`Config`].
pub struct Flock {
    config: Config,
    processor: WallpaperProcessor,
}

impl Flock {
    /// Create a Flock instance using Unsplash and the configured desktop commands.
    pub fn new(config: Config) -> Self {
        let source = Box::new(UnsplashSource::new(&config.source));
        let desktop = Box::new(CommandDesktop::new(&config.desktop));
        Self::with_parts(config, source, desktop)
    }

    /// Create a Flock instance with an explicit source and desktop.
    pub fn with_parts(
        config: Config,
        source: Box<dyn PhotoSource>,
        desktop: Box<dyn Desktop>,
    ) -> Self {
        tracing::debug!("Initializing Flock v{}", VERSION);
        let processor = WallpaperProcessor::new(&config, source, desktop);
        Self { config, processor }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch, apply and record a new wallpaper, then tidy the cache.
    pub async fn run_once(&self) -> Result<RunOutcome> {
        self.processor.run_once().await
    }

    /// Run cache housekeeping on its own.
    pub async fn housekeep(&self) -> std::result::Result<HousekeepingReport, String> {
        self.processor.housekeep().await
    }

    /// Whether the current desktop background is the wallpaper Flock last set.
    pub async fn is_desktop_set_by_flock(&self) -> bool {
        OwnershipChecker::check(self.processor.desktop(), self.processor.metadata()).await
    }

    /// The last recorded wallpaper, if any.
    pub fn current_record(&self) -> Option<ImageRecord> {
        self.processor.metadata().load()
    }

    /// Photographer of the last recorded wallpaper.
    pub fn current_author(&self) -> Option<String> {
        self.processor.metadata().author()
    }

    /// Photographer profile URL of the last recorded wallpaper, as stored.
    pub fn current_author_url(&self) -> Option<String> {
        self.processor.metadata().author_url()
    }
}
