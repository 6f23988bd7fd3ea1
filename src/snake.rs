use std::collections::VecDeque;

use Direction::*;

/// One grid cell. Signed so a head that left the board can still be represented
/// long enough to be rejected by the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// The neighbouring cell one step towards `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Coord::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coord>,
}

impl Snake {
    /// Builds a straight snake whose head sits at `head` and whose body trails
    /// away from `heading`.
    pub fn new(head: Coord, size: usize, heading: Direction) -> Self {
        let back = heading.opposite();
        let body = std::iter::successors(Some(head), |c| Some(c.step(back)))
            .take(size.max(1))
            .collect();

        Snake { body }
    }

    pub fn from_segments<I: IntoIterator<Item = Coord>>(segments: I) -> Option<Self> {
        let body: VecDeque<Coord> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coord> + '_ {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Coord> {
        self.body.iter().copied().collect()
    }

    pub(crate) fn push_head(&mut self, head: Coord) {
        self.body.push_front(head);
    }

    /// Drops the tail segment, keeping at least the head.
    pub(crate) fn pop_tail(&mut self) -> Option<Coord> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}
