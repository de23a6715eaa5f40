//! The `flock status` command: is the desktop ours, and who took the photo.

use clap::Args;
use flock_core::{Config, Flock};
use serde::Serialize;

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Snapshot printed by `flock status`.
#[derive(Debug, Serialize)]
struct Status {
    set_by_flock: bool,
    author: Option<String>,
    author_url: Option<String>,
    local_location: Option<String>,
}

impl Status {
    fn render_text(&self) -> String {
        let mut lines = vec![format!(
            "Desktop wallpaper set by Flock: {}",
            if self.set_by_flock { "yes" } else { "no" }
        )];
        if let Some(author) = &self.author {
            lines.push(format!("Photo by: {author}"));
        }
        if let Some(url) = &self.author_url {
            lines.push(format!("Profile: {}", flock_core::types::with_referral(url)));
        }
        if let Some(path) = &self.local_location {
            lines.push(format!("File: {path}"));
        }
        lines.join("\n")
    }
}

/// Execute the status command.
pub async fn execute(args: StatusArgs, config: Config) -> anyhow::Result<()> {
    let flock = Flock::new(config);
    let status = Status {
        set_by_flock: flock.is_desktop_set_by_flock().await,
        author: flock.current_author(),
        author_url: flock.current_author_url(),
        local_location: flock
            .current_record()
            .map(|r| r.local_location.display().to_string()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", status.render_text());
    }
    Ok(())
}
