//! Decide whether the current desktop background is one Flock applied.
//!
//! The desktop's copy of the wallpaper has usually been converted or
//! recompressed, so the check compares visual fingerprints and tolerates a
//! few flipped cells. Any failure along the way counts as "not ours".

use crate::desktop::Desktop;
use crate::types::ImageRecord;

use super::fingerprint::fingerprint;
use super::metadata::MetadataStore;

/// Matching cells (out of 256) needed before an image counts as ours.
///
/// Carried over unchanged from earlier releases; it has never been tuned
/// against real re-encoding losses and may need recalibrating.
pub const OWNERSHIP_THRESHOLD: usize = 250;

/// Compares the current background against the last saved record.
pub struct OwnershipChecker;

impl OwnershipChecker {
    /// True iff `current_image_bytes` looks like the image in `last_saved`.
    ///
    /// Never fails: no record, an unreadable saved image or an undecodable
    /// image all return `false`.
    pub fn is_owned_by_system(
        current_image_bytes: &[u8],
        last_saved: Option<&ImageRecord>,
    ) -> bool {
        let Some(record) = last_saved else {
            return false;
        };

        let saved_bytes = match std::fs::read(&record.local_location) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(
                    path = %record.local_location.display(),
                    "Saved wallpaper unreadable: {e}"
                );
                return false;
            }
        };

        let fingerprints = (fingerprint(current_image_bytes), fingerprint(&saved_bytes));
        let (current, saved) = match fingerprints {
            (Ok(current), Ok(saved)) => (current, saved),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Ownership check skipped: {e}");
                return false;
            }
        };

        let agreement = current.agreement(&saved);
        tracing::debug!(agreement, threshold = OWNERSHIP_THRESHOLD, "Compared fingerprints");
        agreement > OWNERSHIP_THRESHOLD
    }

    /// Ask the desktop for its current background and compare it with the
    /// record in `metadata`.
    pub async fn check(desktop: &dyn Desktop, metadata: &MetadataStore) -> bool {
        let Some(record) = metadata.load() else {
            return false;
        };

        let current_path = match desktop.current_wallpaper().await {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("Cannot read current wallpaper: {e}");
                return false;
            }
        };

        let current_bytes = match tokio::fs::read(&current_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(
                    path = %current_path.display(),
                    "Current wallpaper unreadable: {e}"
                );
                return false;
            }
        };

        tokio::task::spawn_blocking(move || {
            Self::is_owned_by_system(&current_bytes, Some(&record))
        })
        .await
        .unwrap_or(false)
    }
}
