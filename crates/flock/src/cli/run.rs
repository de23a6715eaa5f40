//! The `flock run` command: one full pipeline run.

use clap::Args;
use flock_core::{Config, Flock};

use super::types::StyleArg;

/// Arguments for the `run` command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Layout style (defaults to desktop.style from the config)
    #[arg(short, long, value_enum)]
    pub style: Option<StyleArg>,

    /// Minimum photo width (defaults to screen.width from the config)
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Minimum photo height (defaults to screen.height from the config)
    #[arg(long)]
    pub min_height: Option<u32>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(style) = self.style {
            config.desktop.style = style.into();
        }
        if let Some(width) = self.min_width {
            config.screen.width = width;
        }
        if let Some(height) = self.min_height {
            config.screen.height = height;
        }
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    let flock = Flock::new(config);
    let outcome = flock.run_once().await?;

    match &outcome.housekeeping {
        Ok(report) if report.total_removed() > 0 => {
            tracing::info!(
                "Cache tidied: {} duplicate(s), {} old image(s) removed",
                report.duplicates_removed,
                report.expired_removed
            );
        }
        Ok(_) => {}
        Err(message) => eprintln!("Warning: cache housekeeping failed: {message}"),
    }

    tracing::info!(
        "Photo by {} ({})",
        outcome.record.author,
        outcome.record.author_profile_url()
    );
    println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::WallpaperStyle;

    #[test]
    fn test_overrides_apply() {
        let args = RunArgs {
            style: Some(StyleArg::Tile),
            min_width: Some(3840),
            min_height: None,
        };
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.desktop.style, WallpaperStyle::Tile);
        assert_eq!(config.screen.width, 3840);
        assert_eq!(config.screen.height, 1080);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = Config::default();
        RunArgs::default().apply_to(&mut config);
        assert_eq!(config.desktop.style, WallpaperStyle::Fill);
        assert_eq!(config.screen.width, 1920);
    }
}
