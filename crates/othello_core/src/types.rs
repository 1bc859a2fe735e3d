//! Core domain types shared across the engine.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stone color. Black moves first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Color {
    /// Black stones (first player).
    Black,
    /// White stones (second player).
    White,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A single board cell: empty or holding one stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No stone.
    Empty,
    /// A stone of the given color.
    Stone(Color),
}

impl Cell {
    /// Checks whether the cell holds no stone.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the stone color, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Stone(color) => Some(color),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Cell::Stone(color)
    }
}

/// A board coordinate. `x` is the column, `y` the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({x}, {y})")]
pub struct Pos {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Pos {
    /// Creates a coordinate from column and row indices.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Per-color stone totals for a board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[display("black {black} - white {white}")]
pub struct StoneCounts {
    /// Number of black stones.
    pub black: u32,
    /// Number of white stones.
    pub white: u32,
}

impl StoneCounts {
    /// Returns the count for one color.
    pub fn of(self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Total number of stones on the board.
    pub fn total(self) -> u32 {
        self.black + self.white
    }
}
