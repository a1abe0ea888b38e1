use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Error;

/// Play one file with the configured player, blocking until it exits.
/// The player is an opaque subprocess; its exit status is only checked
/// for success. An interrupted or failed playback surfaces as a
/// `Subprocess` error and changes nothing else.
pub fn play(config: &AppConfig, path: &Path) -> Result<(), Error> {
    info!("Playing '{}'", path.display());
    let status = Command::new(&config.player_command)
        .args(&config.player_args)
        .arg(path)
        .status()?;

    if !status.success() {
        return Err(Error::Subprocess {
            command: config.player_command.clone(),
            status,
        });
    }
    Ok(())
}
