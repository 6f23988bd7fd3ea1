use anyhow::{Context, Result};
use clap::Parser;
use snake_board::{game::SnakeGame, logging, Cli, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::try_from(Cli::parse()).context("Invalid options")?;
    logging::init(&config)?;

    let mut game = SnakeGame::new(&config).context("Could not start the game")?;

    // The game loop restores the terminal itself, on quit and on error
    game.run().context("Game stopped unexpectedly")
}
