//! Wallpaper pipeline components.
//!
//! - **hash**: Content hashing for duplicate detection
//! - **fingerprint**: 16x16 brightness fingerprints for visual comparison
//! - **cache**: The on-disk image cache
//! - **retriever**: Fetch-until-big-enough loop and download
//! - **housekeeping**: Dedup and capacity enforcement for the cache
//! - **metadata**: The JSON record of the current wallpaper
//! - **ownership**: Is the current desktop background ours?
//! - **processor**: Orchestrates a full run

pub mod cache;
pub mod fingerprint;
pub mod hash;
pub mod housekeeping;
pub mod metadata;
pub mod ownership;
pub mod processor;
pub mod retriever;

// Re-exports for convenient access
pub use cache::{CacheEntry, CacheStore};
pub use fingerprint::{fingerprint, fingerprint_image, VisualFingerprint};
pub use hash::Hasher;
pub use housekeeping::{Housekeeper, HousekeepingReport};
pub use metadata::MetadataStore;
pub use ownership::{OwnershipChecker, OWNERSHIP_THRESHOLD};
pub use processor::{RunOutcome, WallpaperProcessor};
pub use retriever::Retriever;
