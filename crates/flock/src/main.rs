//! Flock CLI - fresh photo wallpapers from the command line.
//!
//! Flock fetches a random landscape photo at least as large as your screen,
//! applies it as the desktop background, remembers the photographer, and keeps
//! its download cache small.
//!
//! # Usage
//!
//! ```bash
//! # Fetch and apply a new wallpaper
//! flock run
//!
//! # Who took the current wallpaper, and is it ours?
//! flock status
//!
//! # Tidy the cache without fetching
//! flock housekeep
//!
//! # View configuration
//! flock config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Flock - fresh photo wallpapers with a bounded local cache.
#[derive(Parser, Debug)]
#[command(name = "flock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "FLOCK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a new wallpaper, apply it, and tidy the cache
    Run(cli::run::RunArgs),

    /// Show whether the desktop wallpaper is Flock's and who took it
    Status(cli::status::StatusArgs),

    /// Remove duplicate and old images from the cache
    Housekeep,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(flock_core::Config::default_path);

    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `flock config path`."
            );
            flock_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Flock v{}", flock_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config).await,
        Commands::Status(args) => cli::status::execute(args, config).await,
        Commands::Housekeep => cli::housekeep::execute(config).await,
        Commands::Config(args) => cli::config::execute(args, &config_path).await,
    }
}
