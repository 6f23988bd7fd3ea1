use std::{fs::File, sync::Mutex};

use crate::config::GameConfig;
use crate::error::{Result, SnakeError};

/// Sends tracing output to the configured log file. The terminal belongs to the
/// game screen, so without a file nothing is installed and events are dropped.
pub fn init(config: &GameConfig) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path).map_err(|source| SnakeError::LogFile {
        path: path.clone(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
