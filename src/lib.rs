//! Snake on a fixed square grid.
//!
//! `state` holds the whole game as a value with `handle_input`, `tick` and
//! `reset` as its only transitions; `render` maps it to grid placements; `game`
//! runs it in the terminal.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;

pub use config::{Cli, GameConfig};
pub use error::SnakeError;
pub use snake::{Coord, Direction, Snake};
pub use state::{Board, GameState, Status, TickOutcome};
