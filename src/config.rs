use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing::Level;

use crate::error::{Result, SnakeError};
use crate::state::{Board, BOARD_SIZE};

pub const MIN_BOARD_SIZE: u16 = 5;
pub const MAX_BOARD_SIZE: u16 = 60;
pub const TICK_MS: u64 = 200;
pub const MIN_TICK_MS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "snake-board")]
#[command(version, about = "Classic snake on a fixed grid, played in the terminal")]
pub struct Cli {
    /// Cells per side of the square board
    #[arg(long, default_value_t = BOARD_SIZE)]
    pub board_size: u16,

    /// Milliseconds between snake moves
    #[arg(long, default_value_t = TICK_MS)]
    pub tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub board: Board,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: Board::default(),
            tick: Duration::from_millis(TICK_MS),
            seed: None,
            log_file: None,
            log_level: Level::INFO,
        }
    }
}

impl TryFrom<Cli> for GameConfig {
    type Error = SnakeError;

    fn try_from(cli: Cli) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&cli.board_size) {
            return Err(SnakeError::BoardSize(cli.board_size));
        }

        if cli.tick_ms < MIN_TICK_MS {
            return Err(SnakeError::TickInterval(cli.tick_ms));
        }

        Ok(GameConfig {
            board: Board::new(cli.board_size),
            tick: Duration::from_millis(cli.tick_ms),
            seed: cli.seed,
            log_file: cli.log_file,
            log_level: cli.log_level,
        })
    }
}
