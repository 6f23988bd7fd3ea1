use rand::Rng;
use tracing::{debug, info};

use crate::snake::{Coord, Direction, Snake};

pub const BOARD_SIZE: u16 = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const INITIAL_DIRECTION: Direction = Direction::Up;

/// Square playing field, `size` cells per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    size: i32,
}

impl Board {
    pub fn new(size: u16) -> Self {
        Board { size: i32::from(size) }
    }

    pub fn size(&self) -> u16 {
        self.size as u16
    }

    pub fn area(&self) -> usize {
        (self.size * self.size) as usize
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        Coord::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size))
    }

    /// Vertical snake in the middle of the board, head up.
    pub fn initial_snake(&self) -> Snake {
        let mid = self.size / 2;
        Snake::new(Coord::new(mid, mid), INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BOARD_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Crashed(Collision),
    /// The snake covers every cell, there is nowhere left to put food.
    BoardFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver(Ending),
}

/// What a single tick did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Idle,
    Moved,
    Ate { score: u32 },
    Ended(Ending),
}

/// True iff `position` is one of the cells in `body`.
pub fn is_occupied<'a, I>(position: Coord, body: I) -> bool
where
    I: IntoIterator<Item = &'a Coord>,
{
    body.into_iter().any(|segment| *segment == position)
}

/// Draws uniformly random cells until one is free of `occupied`.
///
/// Returns `None` only when the snake already covers the whole board.
pub fn generate_food<R: Rng + ?Sized>(occupied: &Snake, board: &Board, rng: &mut R) -> Option<Coord> {
    if occupied.len() >= board.area() {
        return None;
    }

    loop {
        let candidate = board.random_cell(rng);
        if !is_occupied(candidate, occupied.segments()) {
            return Some(candidate);
        }
    }
}

/// The whole game as one value. Every transition goes through `handle_input`,
/// `tick` or `reset`; randomness is injected so transitions are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Coord,
    score: u32,
    status: Status,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Self {
        let snake = board.initial_snake();
        // The initial snake is at most three cells on a board of at least 25.
        let food = generate_food(&snake, &board, rng).unwrap_or_else(|| snake.tail());

        let state = GameState::from_parts(board, snake, INITIAL_DIRECTION, food);
        info!(food.x = state.food.x, food.y = state.food.y, "game started");
        state
    }

    /// Assembles a game already in progress. Used to set up specific positions.
    pub fn from_parts(board: Board, snake: Snake, direction: Direction, food: Coord) -> Self {
        GameState {
            board,
            snake,
            direction,
            pending_direction: direction,
            food,
            score: 0,
            status: Status::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Coord {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, Status::GameOver(_))
    }

    /// Queues a turn for the next tick. Reversing into the neck is refused, as
    /// is any input once the game is over. Returns whether the turn was taken.
    pub fn handle_input(&mut self, candidate: Direction) -> bool {
        if self.is_over() {
            return false;
        }

        if candidate.is_opposite(self.direction) {
            debug!(?candidate, current = ?self.direction, "reversal rejected");
            return false;
        }

        self.pending_direction = candidate;
        true
    }

    /// Advances the snake one cell.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.head().step(self.pending_direction);

        let collision = if !self.board.contains(new_head) {
            Some(Collision::Wall)
        } else if is_occupied(new_head, self.snake.segments()) {
            Some(Collision::SelfBite)
        } else {
            None
        };

        if let Some(collision) = collision {
            return self.end(Ending::Crashed(collision));
        }

        self.direction = self.pending_direction;
        self.snake.push_head(new_head);

        debug!(
            head.x = new_head.x,
            head.y = new_head.y,
            direction = ?self.direction,
            length = self.snake.len(),
            "tick"
        );

        if new_head != self.food {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.score += 1;
        info!(score = self.score, "food eaten");

        match generate_food(&self.snake, &self.board, rng) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate { score: self.score }
            }
            None => self.end(Ending::BoardFilled),
        }
    }

    /// Back to the starting snake, heading up, with fresh food and no score.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = GameState::new(self.board, rng);
    }

    fn end(&mut self, ending: Ending) -> TickOutcome {
        self.status = Status::GameOver(ending);
        info!(?ending, score = self.score, length = self.snake.len(), "game over");
        TickOutcome::Ended(ending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use crate::snake::Direction::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Coord::new(x, y))).unwrap()
    }

    fn initial_with_food(food: Coord) -> GameState {
        let board = Board::default();
        GameState::from_parts(board, board.initial_snake(), Up, food)
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(Board::default(), &mut rng());

        assert_eq!(
            state.snake().to_vec(),
            vec![Coord::new(10, 10), Coord::new(10, 11), Coord::new(10, 12)]
        );
        assert_eq!(state.direction(), Up);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), Status::Playing);
        assert!(!is_occupied(state.food(), state.snake().segments()));
        assert!(state.board().contains(state.food()));
    }

    #[test]
    fn test_tick_moves_up_and_drops_tail() {
        let mut state = initial_with_food(Coord::new(0, 0));

        assert_eq!(state.tick(&mut rng()), TickOutcome::Moved);
        assert_eq!(
            state.snake().to_vec(),
            vec![Coord::new(10, 9), Coord::new(10, 10), Coord::new(10, 11)]
        );
    }

    #[test]
    fn test_every_direction_pair() {
        for current in [Up, Down, Left, Right] {
            for candidate in [Up, Down, Left, Right] {
                let board = Board::default();
                let body = Snake::new(Coord::new(10, 10), 3, current);
                let mut state = GameState::from_parts(board, body, current, Coord::new(0, 0));
                let head = state.snake().head();

                let accepted = state.handle_input(candidate);

                if candidate.is_opposite(current) {
                    assert!(!accepted, "{:?} -> {:?}", current, candidate);
                    assert_eq!(state.pending_direction(), current);
                    continue;
                }

                assert!(accepted, "{:?} -> {:?}", current, candidate);
                assert_eq!(state.tick(&mut rng()), TickOutcome::Moved);
                assert_eq!(state.snake().head(), head.step(candidate));
                assert_eq!(state.direction(), candidate);
                assert_eq!(state.snake().len(), 3);
            }
        }
    }

    #[test]
    fn test_reversal_checked_against_current_direction() {
        let mut state = initial_with_food(Coord::new(0, 0));
        assert!(state.handle_input(Left));
        // Still heading up until the next tick, so Right is a legal turn.
        assert!(state.handle_input(Right));
        assert!(!state.handle_input(Down));
        assert_eq!(state.pending_direction(), Right);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let board = Board::default();
        let mut state = GameState::from_parts(board, snake(&[(0, 5), (1, 5)]), Left, Coord::new(9, 9));
        state.tick(&mut rng());
        assert!(state.is_over());
        assert!(!state.handle_input(Up));
        assert_eq!(state.pending_direction(), Left);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = initial_with_food(Coord::new(10, 9));

        let outcome = state.tick(&mut rng());

        assert_eq!(outcome, TickOutcome::Ate { score: 1 });
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.snake().tail(), Coord::new(10, 12));
        assert!(!is_occupied(state.food(), state.snake().segments()));
    }

    #[test]
    fn test_wall_collision_leaves_state_untouched() {
        let board = Board::default();
        let mut state = GameState::from_parts(board, snake(&[(0, 5), (1, 5), (2, 5)]), Left, Coord::new(9, 9));
        let before = state.clone();

        assert_eq!(state.tick(&mut rng()), TickOutcome::Ended(Ending::Crashed(Collision::Wall)));
        assert_eq!(state.status(), Status::GameOver(Ending::Crashed(Collision::Wall)));
        assert_eq!(state.snake(), before.snake());
        assert_eq!(state.food(), before.food());
        assert_eq!(state.score(), before.score());
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) moving down into (5,6), which is part of the body.
        let board = Board::default();
        let body = snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        let mut state = GameState::from_parts(board, body.clone(), Left, Coord::new(0, 0));
        assert!(state.handle_input(Down));
        let before = state.clone();

        assert_eq!(
            state.tick(&mut rng()),
            TickOutcome::Ended(Ending::Crashed(Collision::SelfBite))
        );
        assert_eq!(state.snake(), &body);
        assert_eq!(state.food(), before.food());
        assert_eq!(state.score(), before.score());
        assert_eq!(state.direction(), Left);
    }

    #[test]
    fn test_tail_cell_counts_as_occupied() {
        // A ring of four: the head would step onto the current tail.
        let board = Board::default();
        let body = snake(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
        let mut state = GameState::from_parts(board, body, Left, Coord::new(0, 0));
        assert!(state.handle_input(Down));

        assert_eq!(
            state.tick(&mut rng()),
            TickOutcome::Ended(Ending::Crashed(Collision::SelfBite))
        );
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let board = Board::default();
        let mut state = GameState::from_parts(board, snake(&[(0, 5)]), Left, Coord::new(9, 9));
        state.tick(&mut rng());
        let frozen = state.clone();

        assert_eq!(state.tick(&mut rng()), TickOutcome::Idle);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_no_duplicate_segments_over_many_ticks() {
        let mut rng = rng();
        let mut state = GameState::new(Board::default(), &mut rng);
        let turns = [Left, Down, Right, Up];

        for i in 0..200 {
            if i % 3 == 0 {
                state.handle_input(turns[(i / 3) % 4]);
            }
            if state.tick(&mut rng) == TickOutcome::Idle {
                break;
            }
            let cells = state.snake().to_vec();
            for (n, cell) in cells.iter().enumerate() {
                assert!(!cells[n + 1..].contains(cell));
            }
        }
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut rng = rng();
        let board = Board::default();
        let mut state = GameState::from_parts(board, snake(&[(0, 5), (1, 5)]), Left, Coord::new(9, 9));
        state.tick(&mut rng);
        assert!(state.is_over());

        state.reset(&mut rng);

        assert_eq!(
            state.snake().to_vec(),
            vec![Coord::new(10, 10), Coord::new(10, 11), Coord::new(10, 12)]
        );
        assert_eq!(state.direction(), Up);
        assert_eq!(state.pending_direction(), Up);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), Status::Playing);
        assert!(!is_occupied(state.food(), state.snake().segments()));
    }

    #[test]
    fn test_generate_food_avoids_snake() {
        let board = Board::new(5);
        // Everything except (4,4) is covered.
        let cells: Vec<Coord> = (0..5)
            .flat_map(|y| (0..5).map(move |x| Coord::new(x, y)))
            .filter(|c| *c != Coord::new(4, 4))
            .collect();
        let body = Snake::from_segments(cells).unwrap();

        assert_eq!(generate_food(&body, &board, &mut rng()), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_generate_food_on_full_board() {
        let board = Board::new(5);
        let cells = (0..5).flat_map(|y| (0..5).map(move |x| Coord::new(x, y)));
        let body = Snake::from_segments(cells).unwrap();

        assert_eq!(generate_food(&body, &board, &mut rng()), None);
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        // 5x5 board, snake covers 24 cells in a serpentine; food on the last free cell.
        let board = Board::new(5);
        let mut cells = Vec::new();
        for y in 0..5 {
            let row: Vec<i32> = if y % 2 == 0 { (0..5).collect() } else { (0..5).rev().collect() };
            for x in row {
                cells.push(Coord::new(x, y));
            }
        }
        // Path ends at (4,4); drop it and make (3,4) the head, heading right.
        let free = cells.pop().unwrap();
        cells.reverse();
        let body = Snake::from_segments(cells).unwrap();
        assert_eq!(body.head(), Coord::new(3, 4));

        let mut state = GameState::from_parts(board, body, Right, free);
        assert_eq!(state.tick(&mut rng()), TickOutcome::Ended(Ending::BoardFilled));
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 25);
    }

    #[test]
    fn test_is_occupied() {
        let body = [Coord::new(1, 1), Coord::new(1, 2)];
        assert!(is_occupied(Coord::new(1, 2), &body));
        assert!(!is_occupied(Coord::new(2, 1), &body));
        assert!(!is_occupied(Coord::new(0, 0), &[]));
    }
}
