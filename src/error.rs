use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, MIN_TICK_MS};

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("Terminal error: {source}")]
    Terminal {
        #[from]
        source: io::Error,
    },
    #[error("Terminal is {width}x{height}, the board needs at least {needed_width}x{needed_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        needed_width: u16,
        needed_height: u16,
    },
    #[error("Board size {0} is outside {}..={}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    BoardSize(u16),
    #[error("Tick interval of {0} ms is shorter than {} ms", MIN_TICK_MS)]
    TickInterval(u64),
    #[error("Could not open log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SnakeError>;
