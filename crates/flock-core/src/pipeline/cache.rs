//! The local wallpaper cache: a flat directory of downloaded images.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A file currently in the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// Birth time where the filesystem records it, otherwise last modification
    pub created: SystemTime,
}

/// Handle on the cache directory.
///
/// Entries are whatever regular files sit directly in the directory; nothing
/// about them is remembered between calls.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory if it does not exist yet.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Reserve a never-before-used path for a new download.
    pub fn new_image_path(&self) -> PathBuf {
        self.dir.join(format!("{}.jpg", uuid::Uuid::new_v4()))
    }

    /// List the current entries, sorted oldest first.
    ///
    /// A missing directory is an empty cache. Subdirectories and in-progress
    /// `.part` downloads are not entries. Symlinks are followed, so a dangling
    /// link is an error.
    pub fn entries(&self) -> std::io::Result<Vec<CacheEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || is_partial_download(entry.path()) {
                continue;
            }
            let metadata = entry.metadata().map_err(std::io::Error::from)?;
            let created = metadata.created().or_else(|_| metadata.modified())?;
            entries.push(CacheEntry {
                path: entry.into_path(),
                created,
            });
        }

        // Path as tie-breaker keeps ordering stable for equal timestamps
        entries.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> std::io::Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> std::io::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Delete one entry from disk.
    pub fn remove(&self, entry: &CacheEntry) -> std::io::Result<()> {
        std::fs::remove_file(&entry.path)
    }
}

/// Temporary name used while a download is streaming in.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// A download in progress under its `.part` name.
///
/// The partial file is deleted when this is dropped without [`persist`]
/// succeeding, including when the download future is cancelled.
///
/// [`persist`]: PartialDownload::persist
pub(crate) struct PartialDownload {
    partial: PathBuf,
    dest: PathBuf,
    persisted: bool,
}

impl PartialDownload {
    pub(crate) fn new(dest: &Path) -> Self {
        Self {
            partial: partial_path(dest),
            dest: dest.to_path_buf(),
            persisted: false,
        }
    }

    /// Where the bytes should be written.
    pub(crate) fn path(&self) -> &Path {
        &self.partial
    }

    /// Move the finished file to its final name.
    pub(crate) async fn persist(mut self) -> std::io::Result<()> {
        tokio::fs::rename(&self.partial, &self.dest).await?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for PartialDownload {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        match std::fs::remove_file(&self.partial) {
            Ok(()) => tracing::debug!(path = %self.partial.display(), "Removed partial download"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.partial.display(),
                "Failed to remove partial download: {e}"
            ),
        }
    }
}

fn is_partial_download(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "part")
}
