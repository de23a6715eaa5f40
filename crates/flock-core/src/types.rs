//! Core data types shared by the retrieval, persistence and desktop stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Query string appended to photographer links for source attribution.
pub const REFERRAL_QUERY: &str = "utm_source=flock&utm_medium=referral&utm_campaign=api-credit";

/// A downloaded wallpaper and where it came from.
///
/// Only the retriever constructs these, and only after the image has been
/// written to `local_location`. This is also the shape of the metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Width in pixels as reported by the source
    pub width: u32,

    /// Height in pixels as reported by the source
    pub height: u32,

    /// URL of the full-resolution image
    pub remote_location: String,

    /// Path of the downloaded copy inside the cache
    pub local_location: PathBuf,

    /// Photographer's display name
    pub author: String,

    /// Photographer's profile page
    pub author_url: String,
}

impl ImageRecord {
    /// Photographer profile link with the referral query attached.
    pub fn author_profile_url(&self) -> String {
        with_referral(&self.author_url)
    }
}

/// Append the referral query to a URL, respecting any existing query string.
pub fn with_referral(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{REFERRAL_QUERY}")
}

/// A photo offered by the remote source that has not been downloaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCandidate {
    pub width: u32,
    pub height: u32,
    pub remote_location: String,
    pub author: String,
    pub author_url: String,
    /// Fresh cache path reserved for this candidate
    pub local_location: PathBuf,
}

impl PhotoCandidate {
    /// Whether the photo covers a screen of the given size.
    pub fn fits(&self, min_width: u32, min_height: u32) -> bool {
        self.width >= min_width && self.height >= min_height
    }

    /// Promote to a record once the image is on disk.
    pub(crate) fn into_record(self) -> ImageRecord {
        ImageRecord {
            width: self.width,
            height: self.height,
            remote_location: self.remote_location,
            local_location: self.local_location,
            author: self.author,
            author_url: self.author_url,
        }
    }
}

/// How a wallpaper is laid out on the desktop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperStyle {
    #[default]
    Fill,
    Fit,
    Span,
    Stretch,
    Tile,
    Center,
}

impl WallpaperStyle {
    /// All styles, in settings-menu order.
    pub const ALL: [WallpaperStyle; 6] = [
        WallpaperStyle::Fill,
        WallpaperStyle::Fit,
        WallpaperStyle::Span,
        WallpaperStyle::Stretch,
        WallpaperStyle::Tile,
        WallpaperStyle::Center,
    ];

    /// Lowercase name, as used in config files and command templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            WallpaperStyle::Fill => "fill",
            WallpaperStyle::Fit => "fit",
            WallpaperStyle::Span => "span",
            WallpaperStyle::Stretch => "stretch",
            WallpaperStyle::Tile => "tile",
            WallpaperStyle::Center => "center",
        }
    }

    /// `(WallpaperStyle, TileWallpaper)` values under
    /// `HKCU\Control Panel\Desktop` for this style.
    pub fn windows_registry_values(&self) -> (u32, u32) {
        match self {
            WallpaperStyle::Fill => (10, 0),
            WallpaperStyle::Fit => (6, 0),
            WallpaperStyle::Span => (22, 0),
            WallpaperStyle::Stretch => (2, 0),
            WallpaperStyle::Tile => (0, 1),
            WallpaperStyle::Center => (0, 0),
        }
    }
}

impl fmt::Display for WallpaperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(width: u32, height: u32) -> PhotoCandidate {
        PhotoCandidate {
            width,
            height,
            remote_location: "https://images.unsplash.com/photo-1".to_string(),
            author: "Jane Doe".to_string(),
            author_url: "https://unsplash.com/@jane".to_string(),
            local_location: PathBuf::from("/tmp/cache/a.jpg"),
        }
    }

    #[test]
    fn test_fits_requires_both_dimensions() {
        assert!(candidate(1920, 1080).fits(1920, 1080));
        assert!(candidate(3840, 2160).fits(1920, 1080));
        assert!(!candidate(800, 600).fits(1920, 1080));
        assert!(!candidate(4000, 1000).fits(1920, 1080));
        assert!(!candidate(1000, 4000).fits(1920, 1080));
    }

    #[test]
    fn test_record_json_field_names() {
        let record = candidate(1920, 1200).into_record();
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "width",
            "height",
            "remote_location",
            "local_location",
            "author",
            "author_url",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["author"], "Jane Doe");
    }

    #[test]
    fn test_author_profile_url_appends_referral() {
        let record = candidate(1920, 1200).into_record();
        assert_eq!(
            record.author_profile_url(),
            "https://unsplash.com/@jane?utm_source=flock&utm_medium=referral&utm_campaign=api-credit"
        );
        assert!(with_referral("https://unsplash.com/?a=1").contains("?a=1&utm_source"));
    }

    #[test]
    fn test_style_registry_values() {
        assert_eq!(WallpaperStyle::Fill.windows_registry_values(), (10, 0));
        assert_eq!(WallpaperStyle::Span.windows_registry_values(), (22, 0));
        assert_eq!(WallpaperStyle::Tile.windows_registry_values(), (0, 1));
        assert_eq!(WallpaperStyle::Center.windows_registry_values(), (0, 0));
    }

    #[test]
    fn test_style_serde_lowercase() {
        let json = serde_json::to_string(&WallpaperStyle::Stretch).unwrap();
        assert_eq!(json, "\"stretch\"");
        let style: WallpaperStyle = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(style, WallpaperStyle::Center);
        assert_eq!(WallpaperStyle::ALL.len(), 6);
    }
}
