//! Pipeline orchestration - fetch, apply, record, tidy.

use crate::config::{Config, ScreenConfig};
use crate::desktop::Desktop;
use crate::error::Result;
use crate::source::PhotoSource;
use crate::types::{ImageRecord, WallpaperStyle};

use super::cache::CacheStore;
use super::housekeeping::{Housekeeper, HousekeepingReport};
use super::metadata::MetadataStore;
use super::retriever::Retriever;

/// Result of a successful pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The wallpaper now on the desktop
    pub record: ImageRecord,
    /// Housekeeping result; a failure here does not undo the new wallpaper
    pub housekeeping: std::result::Result<HousekeepingReport, String>,
}

/// Runs Retriever → desktop apply → metadata save → housekeeping.
///
/// One run at a time: nothing here guards against concurrent calls.
pub struct WallpaperProcessor {
    retriever: Retriever,
    desktop: Box<dyn Desktop>,
    metadata: MetadataStore,
    store: CacheStore,
    max_entries: usize,
    screen: ScreenConfig,
    style: WallpaperStyle,
}

impl WallpaperProcessor {
    /// Wire a processor from config with explicit source and desktop.
    pub fn new(config: &Config, source: Box<dyn PhotoSource>, desktop: Box<dyn Desktop>) -> Self {
        let store = CacheStore::new(config.cache_dir());
        Self {
            retriever: Retriever::new(source, store.clone(), config.retrieval.clone()),
            desktop,
            metadata: MetadataStore::new(config.metadata_path()),
            store,
            max_entries: config.cache.max_entries,
            screen: config.screen.clone(),
            style: config.desktop.style,
        }
    }

    pub fn desktop(&self) -> &dyn Desktop {
        self.desktop.as_ref()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Fetch a new wallpaper, apply it, record it, then tidy the cache.
    pub async fn run_once(&self) -> Result<RunOutcome> {
        let start = std::time::Instant::now();

        let record = self
            .retriever
            .fetch_one(self.screen.width, self.screen.height)
            .await?;
        tracing::trace!("  Fetch: {:?}", start.elapsed());

        self.desktop
            .apply(&record.local_location, self.style)
            .await?;
        self.metadata.save(&record)?;

        let housekeeping = match self.housekeep().await {
            Ok(report) => Ok(report),
            Err(message) => {
                tracing::warn!("Housekeeping failed: {message}");
                Err(message)
            }
        };

        tracing::debug!("Run finished in {:?}", start.elapsed());
        Ok(RunOutcome {
            record,
            housekeeping,
        })
    }

    /// Run housekeeping on the blocking pool.
    pub async fn housekeep(&self) -> std::result::Result<HousekeepingReport, String> {
        let housekeeper = Housekeeper::new(self.store.clone(), self.max_entries);
        match tokio::task::spawn_blocking(move || housekeeper.run()).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("housekeeping task failed: {e}")),
        }
    }
}
