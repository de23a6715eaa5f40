//! The `flock housekeep` command.

use flock_core::{Config, Flock};

/// Execute the housekeep command.
pub async fn execute(config: Config) -> anyhow::Result<()> {
    let cache_dir = config.cache_dir();
    let flock = Flock::new(config);

    let report = flock.housekeep().await.map_err(|message| {
        anyhow::anyhow!("Housekeeping of {} failed: {message}", cache_dir.display())
    })?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
