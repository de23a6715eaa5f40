//! Desktop integration.
//!
//! Flock needs exactly two things from the desktop: set an image as the
//! background, and report which file is currently the background. Both sit
//! behind the [`Desktop`] trait. [`CommandDesktop`] implements them by running
//! user-configured commands, which keeps platform specifics out of the crate.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::DesktopConfig;
use crate::error::DesktopError;
use crate::types::WallpaperStyle;

/// Applies and reports the desktop background.
#[async_trait]
pub trait Desktop: Send + Sync {
    /// Set `image` as the background using `style`.
    async fn apply(&self, image: &Path, style: WallpaperStyle) -> Result<(), DesktopError>;

    /// Path of the image currently used as the background.
    async fn current_wallpaper(&self) -> Result<PathBuf, DesktopError>;
}

/// Runs argv templates such as `["feh", "--bg-{style}", "{path}"]`.
pub struct CommandDesktop {
    apply_command: Vec<String>,
    current_command: Vec<String>,
}

impl CommandDesktop {
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            apply_command: config.apply_command.clone(),
            current_command: config.current_command.clone(),
        }
    }

    async fn run(
        template: &[String],
        what: &'static str,
        path: &Path,
        style: WallpaperStyle,
    ) -> Result<String, DesktopError> {
        let argv = render(template, path, style);
        let Some((program, args)) = argv.split_first() else {
            return Err(DesktopError::NotConfigured(what));
        };

        tracing::debug!(program = %program, ?args, "Running {what} command");
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| DesktopError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DesktopError::CommandFailed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Substitute `{path}` and `{style}` in every argument.
fn render(template: &[String], path: &Path, style: WallpaperStyle) -> Vec<String> {
    let path = path.to_string_lossy();
    template
        .iter()
        .map(|arg| arg.replace("{path}", &path).replace("{style}", style.as_str()))
        .collect()
}

#[async_trait]
impl Desktop for CommandDesktop {
    async fn apply(&self, image: &Path, style: WallpaperStyle) -> Result<(), DesktopError> {
        Self::run(&self.apply_command, "apply", image, style).await?;
        tracing::info!(path = %image.display(), %style, "Wallpaper applied");
        Ok(())
    }

    async fn current_wallpaper(&self) -> Result<PathBuf, DesktopError> {
        let stdout = Self::run(
            &self.current_command,
            "current-wallpaper",
            Path::new(""),
            WallpaperStyle::default(),
        )
        .await?;

        wallpaper_path(&stdout)
            .ok_or_else(|| DesktopError::EmptyOutput(self.current_command.join(" ")))
    }
}

/// Turn a current-wallpaper command's output into a path.
///
/// Some tools quote the value, and gsettings prints a percent-encoded
/// `file://` URI (`'file:///home/me/My%20Pictures/a.jpg'`).
fn wallpaper_path(output: &str) -> Option<PathBuf> {
    let trimmed = output.trim().trim_matches('\'').trim_matches('"');
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("file://") {
        let decoded = reqwest::Url::parse(trimmed)
            .ok()
            .and_then(|url| url.to_file_path().ok());
        return Some(decoded.unwrap_or_else(|| PathBuf::from(rest)));
    }
    Some(PathBuf::from(trimmed))
}
