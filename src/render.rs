//! Maps game values to grid placements. Nothing here knows about the terminal.

use crate::snake::{Coord, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
}

/// A cell to draw, addressed by 1-based grid row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: u16,
    pub column: u16,
    pub kind: CellKind,
}

impl Placement {
    fn at(pos: Coord, kind: CellKind) -> Self {
        Placement {
            row: grid_index(pos.y),
            column: grid_index(pos.x),
            kind,
        }
    }
}

fn grid_index(v: i32) -> u16 {
    u16::try_from(v + 1).unwrap_or(0)
}

/// Food first, then the snake from head to tail, so a painter that draws in
/// order puts the snake on top.
pub fn placements(snake: &Snake, food: Coord) -> Vec<Placement> {
    let mut cells = Vec::with_capacity(snake.len() + 1);
    cells.push(Placement::at(food, CellKind::Food));

    for (i, pos) in snake.segments().enumerate() {
        let kind = if i == 0 { CellKind::Head } else { CellKind::Body };
        cells.push(Placement::at(*pos, kind));
    }

    cells
}
