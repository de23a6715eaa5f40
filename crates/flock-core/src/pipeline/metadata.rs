//! Persistence of the record describing the wallpaper we last applied.

use std::path::{Path, PathBuf};

use crate::types::ImageRecord;

/// The JSON side file holding the most recently applied [`ImageRecord`].
///
/// Every save replaces the whole file. Reads never fail: a missing or
/// unparsable file simply means there is no current record.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `record`.
    pub fn save(&self, record: &ImageRecord) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Saved wallpaper record");
        Ok(())
    }

    /// The last saved record, if the file exists and parses.
    pub fn load(&self) -> Option<ImageRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "No wallpaper record: {e}");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Ignoring corrupt wallpaper record: {e}"
                );
                None
            }
        }
    }

    /// Photographer of the current wallpaper.
    ///
    /// Only the `author` field has to be present, so hand-edited or partial
    /// files still answer.
    pub fn author(&self) -> Option<String> {
        self.field("author")
    }

    /// Photographer profile URL of the current wallpaper, exactly as stored.
    pub fn author_url(&self) -> Option<String> {
        self.field("author_url")
    }

    fn field(&self, key: &str) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let value: serde_json::Value = serde_json::from_str(&content).ok()?;
        value.get(key)?.as_str().map(str::to_string)
    }
}
