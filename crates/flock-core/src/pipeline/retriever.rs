//! Fetch a random photo that is at least as large as the screen.
//!
//! Candidates are requested one at a time until one fits. The loop is bounded
//! twice: by `max_attempts` candidates and by an overall deadline that also
//! covers the download. Transport failures end the fetch straight away and
//! are never retried here. Only the accepted candidate is downloaded, so a
//! returned [`ImageRecord`] always points at a complete file.

use std::time::Duration;
use tokio::time::timeout;

use crate::config::RetrievalConfig;
use crate::error::{FetchError, FetchResult};
use crate::source::PhotoSource;
use crate::types::{ImageRecord, PhotoCandidate};

use super::cache::{CacheStore, PartialDownload};

/// Drives a [`PhotoSource`] until it yields a large-enough photo.
pub struct Retriever {
    source: Box<dyn PhotoSource>,
    store: CacheStore,
    policy: RetrievalConfig,
}

impl Retriever {
    pub fn new(source: Box<dyn PhotoSource>, store: CacheStore, policy: RetrievalConfig) -> Self {
        Self {
            source,
            store,
            policy,
        }
    }

    /// Fetch and download one photo of at least `min_width` x `min_height`.
    pub async fn fetch_one(&self, min_width: u32, min_height: u32) -> FetchResult<ImageRecord> {
        let deadline = Duration::from_millis(self.policy.timeout_ms);
        match timeout(deadline, self.fetch_unbounded_time(min_width, min_height)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                timeout_ms: self.policy.timeout_ms,
            }),
        }
    }

    async fn fetch_unbounded_time(
        &self,
        min_width: u32,
        min_height: u32,
    ) -> FetchResult<ImageRecord> {
        let candidate = self.find_candidate(min_width, min_height).await?;
        self.download(candidate).await
    }

    async fn find_candidate(&self, min_width: u32, min_height: u32) -> FetchResult<PhotoCandidate> {
        for attempt in 1..=self.policy.max_attempts {
            tracing::debug!(source = self.source.name(), attempt, "Requesting random photo");
            let photo = self.source.random_photo().await?;

            let candidate = PhotoCandidate {
                width: photo.width,
                height: photo.height,
                remote_location: photo.remote_location,
                author: photo.author,
                author_url: photo.author_url,
                local_location: self.store.new_image_path(),
            };

            if candidate.fits(min_width, min_height) {
                tracing::info!(
                    width = candidate.width,
                    height = candidate.height,
                    author = %candidate.author,
                    attempt,
                    "Accepted photo"
                );
                return Ok(candidate);
            }

            tracing::debug!(
                width = candidate.width,
                height = candidate.height,
                min_width,
                min_height,
                "Photo too small, trying another"
            );
        }

        Err(FetchError::RetriesExhausted {
            attempts: self.policy.max_attempts,
            min_width,
            min_height,
        })
    }

    /// Stream into a `.part` file and rename once complete.
    ///
    /// The partial file never outlives a failed, cancelled or timed-out
    /// download.
    async fn download(&self, candidate: PhotoCandidate) -> FetchResult<ImageRecord> {
        let dest = candidate.local_location.clone();
        self.store
            .ensure_exists()
            .map_err(|source| FetchError::Io {
                path: self.store.dir().to_path_buf(),
                source,
            })?;

        let partial = PartialDownload::new(&dest);
        let written = self
            .source
            .download(&candidate.remote_location, partial.path())
            .await?;
        partial.persist().await.map_err(|source| FetchError::Io {
            path: dest.clone(),
            source,
        })?;

        tracing::info!(path = %dest.display(), bytes = written, "Downloaded photo");
        Ok(candidate.into_record())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::RemotePhoto;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// What a scripted source returns for one `random_photo` call.
    pub(crate) enum Reply {
        Photo(RemotePhoto),
        Fail,
        Hang,
    }

    /// How a scripted download ends after writing its first bytes.
    #[derive(Clone, Copy, Default)]
    pub(crate) enum DownloadEnd {
        #[default]
        Complete,
        Broken,
        Stalled,
    }

    /// Replays canned replies and records downloaded URLs.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedSource {
        replies: Arc<Mutex<VecDeque<Reply>>>,
        pub downloads: Arc<Mutex<Vec<String>>>,
        pub calls: Arc<Mutex<usize>>,
        pub image_bytes: Vec<u8>,
        pub download_end: DownloadEnd,
    }

    impl ScriptedSource {
        pub(crate) fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                image_bytes: b"jpeg bytes".to_vec(),
                ..Self::default()
            }
        }

        pub(crate) fn with_image(mut self, bytes: Vec<u8>) -> Self {
            self.image_bytes = bytes;
            self
        }

        pub(crate) fn ending(mut self, end: DownloadEnd) -> Self {
            self.download_end = end;
            self
        }
    }

    pub(crate) fn photo(width: u32, height: u32, id: &str) -> RemotePhoto {
        RemotePhoto {
            width,
            height,
            remote_location: format!("https://images.unsplash.com/{id}"),
            author: "Jane Doe".to_string(),
            author_url: "https://unsplash.com/@jane".to_string(),
        }
    }

    #[async_trait]
    impl PhotoSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn random_photo(&self) -> FetchResult<RemotePhoto> {
            *self.calls.lock().unwrap() += 1;
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Photo(photo)) => Ok(photo),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!("deadline should fire first")
                }
                Some(Reply::Fail) | None => Err(FetchError::Transport {
                    url: "https://api.unsplash.com/photos/random".to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }

        async fn download(&self, url: &str, dest: &Path) -> FetchResult<u64> {
            self.downloads.lock().unwrap().push(url.to_string());
            std::fs::write(dest, &self.image_bytes).map_err(|source| FetchError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
            match self.download_end {
                DownloadEnd::Complete => Ok(self.image_bytes.len() as u64),
                DownloadEnd::Broken => Err(FetchError::Download {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                }),
                DownloadEnd::Stalled => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!("deadline should fire first")
                }
            }
        }
    }

    fn retriever(source: ScriptedSource, dir: &Path, max_attempts: u32) -> Retriever {
        Retriever::new(
            Box::new(source),
            CacheStore::new(dir),
            RetrievalConfig {
                max_attempts,
                timeout_ms: 5_000,
            },
        )
    }

    fn cache_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .map(|rd| rd.map(|e| e.unwrap().path()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_rejects_small_then_accepts_large() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![
            Reply::Photo(photo(800, 600, "small")),
            Reply::Photo(photo(1920, 1200, "large")),
        ]);
        let downloads = source.downloads.clone();

        let record = retriever(source, dir.path(), 10)
            .fetch_one(1920, 1080)
            .await
            .unwrap();

        assert_eq!((record.width, record.height), (1920, 1200));
        assert_eq!(record.remote_location, "https://images.unsplash.com/large");
        assert_eq!(
            *downloads.lock().unwrap(),
            vec!["https://images.unsplash.com/large".to_string()]
        );
        assert!(record.local_location.exists());
        assert_eq!(cache_files(dir.path()), vec![record.local_location.clone()]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![Reply::Fail, Reply::Photo(photo(4000, 3000, "x"))]);
        let calls = source.calls.clone();

        let err = retriever(source, dir.path(), 10)
            .fetch_one(1920, 1080)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_late_failure_returns_no_stale_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![Reply::Photo(photo(800, 600, "small")), Reply::Fail]);
        let downloads = source.downloads.clone();

        let result = retriever(source, dir.path(), 10).fetch_one(1920, 1080).await;

        assert!(matches!(result, Err(FetchError::Transport { .. })));
        assert!(downloads.lock().unwrap().is_empty());
        assert!(cache_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let replies = (0..5)
            .map(|i| Reply::Photo(photo(640, 480, &format!("p{i}"))))
            .collect();
        let source = ScriptedSource::new(replies);
        let calls = source.calls.clone();

        let err = retriever(source, dir.path(), 3)
            .fetch_one(1920, 1080)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::RetriesExhausted {
                attempts: 3,
                min_width: 1920,
                min_height: 1080
            }
        ));
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_a_hung_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![Reply::Hang]);

        let err = retriever(source, dir.path(), 10)
            .fetch_one(1920, 1080)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout { timeout_ms: 5_000 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_during_download_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let retriever = retriever(
            ScriptedSource::new(vec![
                Reply::Photo(photo(2560, 1440, "a")),
                Reply::Photo(photo(2560, 1440, "b")),
                Reply::Photo(photo(2560, 1440, "c")),
            ])
            .with_image(vec![0u8; 1024])
            .ending(DownloadEnd::Stalled),
            dir.path(),
            10,
        );

        for _ in 0..3 {
            let err = retriever.fetch_one(1920, 1080).await.unwrap_err();
            assert!(matches!(err, FetchError::Timeout { timeout_ms: 5_000 }));
        }

        assert!(cache_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_broken_download_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![Reply::Photo(photo(2560, 1440, "a"))])
            .ending(DownloadEnd::Broken);

        let err = retriever(source, dir.path(), 10)
            .fetch_one(1920, 1080)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Download { .. }));
        assert!(cache_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_exact_screen_size_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptedSource::new(vec![Reply::Photo(photo(1920, 1080, "exact"))]);

        let record = retriever(source, dir.path(), 1)
            .fetch_one(1920, 1080)
            .await
            .unwrap();
        assert_eq!(record.remote_location, "https://images.unsplash.com/exact");
    }
}
