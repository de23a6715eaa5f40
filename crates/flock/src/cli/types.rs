//! CLI enum types shared by commands.

use clap::ValueEnum;
use flock_core::WallpaperStyle;

/// Wallpaper layout styles.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StyleArg {
    /// Scale to cover the screen, cropping overflow
    Fill,
    /// Scale to fit inside the screen
    Fit,
    /// Stretch across all monitors
    Span,
    /// Stretch to the screen, ignoring aspect ratio
    Stretch,
    /// Repeat at original size
    Tile,
    /// Center at original size
    Center,
}

impl From<StyleArg> for WallpaperStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Fill => WallpaperStyle::Fill,
            StyleArg::Fit => WallpaperStyle::Fit,
            StyleArg::Span => WallpaperStyle::Span,
            StyleArg::Stretch => WallpaperStyle::Stretch,
            StyleArg::Tile => WallpaperStyle::Tile,
            StyleArg::Center => WallpaperStyle::Center,
        }
    }
}
