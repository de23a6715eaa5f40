//! Remote photo sources.
//!
//! The retriever only needs two things from a source: describe one random
//! photo, and download an image URL to disk. [`UnsplashSource`] is the real
//! implementation; tests substitute scripted sources.

mod unsplash;

pub use unsplash::UnsplashSource;

use async_trait::async_trait;
use std::path::Path;

use crate::error::FetchResult;

/// A photo described by the source, before any local path is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePhoto {
    pub width: u32,
    pub height: u32,
    /// URL of the full-resolution image
    pub remote_location: String,
    pub author: String,
    pub author_url: String,
}

/// Trait that all photo sources implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the retriever holds a `Box<dyn PhotoSource>`).
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Ask for one random photo description.
    async fn random_photo(&self) -> FetchResult<RemotePhoto>;

    /// Stream the image at `url` into `dest`, returning the bytes written.
    async fn download(&self, url: &str, dest: &Path) -> FetchResult<u64>;
}
