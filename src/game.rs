use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{Result, SnakeError};
use crate::input::{self, Command};
use crate::render::{self, CellKind, Placement};
use crate::snake::Direction::{self, *};
use crate::state::{Board, Collision, Ending, GameState, TickOutcome};
use crate::term::{ScreenPos, TermManager};

const TITLE: &str = "Snake Game";
const CONTROLS: &str = "Arrows/WASD move   Esc pause   Q quit";

/// Terminal columns per grid cell; glyphs are about twice as tall as wide.
const CELL_WIDTH: u16 = 2;

const SNAKE_BODY: &str = "██";
const FOOD: &str = "()";
const DEAD_SNAKE: &str = "XX";
const EMPTY: &str = "  ";

/// Where the pieces of the screen go for a given board and terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub header_row: u16,
    pub frame_top_left: ScreenPos,
    pub frame_width: u16,
    pub frame_height: u16,
    pub footer_row: Option<u16>,
}

impl Layout {
    pub fn fit(board: Board, term_size: ScreenPos) -> Result<Self> {
        let (width, height) = term_size;
        let frame_width = board.size() * CELL_WIDTH + 2;
        let frame_height = board.size() + 2;
        let needed_height = frame_height + 1;

        if width < frame_width || height < needed_height {
            return Err(SnakeError::TerminalTooSmall {
                width,
                height,
                needed_width: frame_width,
                needed_height,
            });
        }

        let with_footer = height > needed_height;
        let used = needed_height + u16::from(with_footer);
        let header_row = (height - used) / 2;
        let frame_top = header_row + 1;

        Ok(Layout {
            header_row,
            frame_top_left: ((width - frame_width) / 2, frame_top),
            frame_width,
            frame_height,
            footer_row: with_footer.then(|| frame_top + frame_height),
        })
    }

    /// Screen position of a 1-based grid placement.
    pub fn cell(&self, p: &Placement) -> ScreenPos {
        let (x0, y0) = self.frame_top_left;
        (x0 + 1 + (p.column - 1) * CELL_WIDTH, y0 + p.row)
    }
}

/// Title and score share the single row above the board.
fn header_text(score: u32) -> String {
    format!("{}   Score: {}", TITLE, score)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Up => "^^",
        Down => "vv",
        Left => "<<",
        Right => ">>",
    }
}

/// Owns the game state and drives it from one persistent ticker and the keyboard.
pub struct SnakeGame {
    term: TermManager,
    layout: Layout,
    state: GameState,
    rng: StdRng,
    tick: Duration,
    paused: bool,
    drawn: Vec<Placement>,
}

impl SnakeGame {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let term = TermManager::new()?;
        let layout = Layout::fit(config.board, term.size())?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(config.board, &mut rng);

        Ok(SnakeGame {
            term,
            layout,
            state,
            rng,
            tick: config.tick,
            paused: false,
            drawn: Vec::new(),
        })
    }

    /// Runs until the player quits. The terminal is restored even on error.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let played = self.play();
        let restored = self.term.restore();

        played?;
        restored?;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.draw_screen()?;
        let mut next_tick = Instant::now() + self.tick;

        loop {
            let now = Instant::now();
            if now >= next_tick {
                next_tick += self.tick;
                if next_tick <= now {
                    // Fell behind, e.g. the process was suspended; don't burst.
                    next_tick = now + self.tick;
                }
                self.step()?;
                continue;
            }

            let key = match self.term.poll_key(next_tick - now)? {
                Some(key) => key,
                None => continue,
            };

            match input::command_for(&key) {
                Some(Command::Quit) => {
                    info!(score = self.state.score(), "quit");
                    return Ok(());
                }
                Some(Command::Turn(dir)) if !self.paused => {
                    self.state.handle_input(dir);
                }
                Some(Command::Reset) if self.state.is_over() => {
                    self.reset()?;
                    next_tick = Instant::now() + self.tick;
                }
                Some(Command::Pause) if !self.state.is_over() => self.toggle_pause()?,
                _ => {}
            }
        }
    }

    fn step(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }

        match self.state.tick(&mut self.rng) {
            TickOutcome::Idle => Ok(()),
            TickOutcome::Moved => self.draw_board(),
            TickOutcome::Ate { .. } => {
                self.draw_header()?;
                self.draw_board()
            }
            TickOutcome::Ended(ending) => {
                self.draw_header()?;
                self.draw_board()?;
                self.game_over(ending)
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.state.reset(&mut self.rng);
        self.paused = false;
        self.term.hide_message()?;
        self.draw_header()?;
        self.draw_board()
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if self.paused {
            self.term.hide_message()?;
        } else {
            self.term.show_message(&["Paused", "", "Press Esc to resume"])?;
        }

        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        Ok(())
    }

    fn game_over(&mut self, ending: Ending) -> Result<()> {
        let title = match ending {
            Ending::BoardFilled => "You won!",
            Ending::Crashed(_) => "Game Over!",
        };
        let cause = match ending {
            Ending::Crashed(Collision::Wall) => "You hit the wall",
            Ending::Crashed(Collision::SelfBite) => "You bit yourself",
            Ending::BoardFilled => "The board is full",
        };

        if let Ending::Crashed(_) = ending {
            for p in self.drawn.clone() {
                if p.kind != CellKind::Food {
                    self.term.print_at(self.layout.cell(&p), DEAD_SNAKE)?;
                }
            }
        }

        let score = format!("Score: {}", self.state.score());
        self.term.show_message(&[
            title,
            cause,
            &score,
            "",
            "Press R or Enter to play again,",
            "or Q to quit.",
        ])?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_screen(&mut self) -> Result<()> {
        self.term.clear()?;
        let Layout { frame_top_left, frame_width, frame_height, footer_row, .. } = self.layout;
        self.term.draw_borders(frame_top_left, frame_width, frame_height)?;

        if let Some(row) = footer_row {
            self.term.print_centered(row, CONTROLS)?;
        }

        self.draw_header()?;
        self.draw_board()
    }

    fn draw_header(&mut self) -> Result<()> {
        let text = header_text(self.state.score());
        self.term.print_centered(self.layout.header_row, &text)?;
        Ok(())
    }

    /// Erases the previous frame's cells and paints the current ones.
    fn draw_board(&mut self) -> Result<()> {
        let cells = render::placements(self.state.snake(), self.state.food());

        for old in std::mem::take(&mut self.drawn) {
            self.term.print_at(self.layout.cell(&old), EMPTY)?;
        }

        let head = head_glyph(self.state.direction());
        for p in &cells {
            let glyph = match p.kind {
                CellKind::Head => head,
                CellKind::Body => SNAKE_BODY,
                CellKind::Food => FOOD,
            };
            self.term.print_at(self.layout.cell(p), glyph)?;
        }

        self.drawn = cells;
        self.term.flush()?;
        Ok(())
    }
}
