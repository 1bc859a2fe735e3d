//! Initial board layouts.
//!
//! A [`Layout`] is a validated square grid of cells. Validation happens on
//! construction so that [`crate::Board`] never has to re-check its input.
//! The raw grid format uses the same 0/1/2 cell encoding as the layout
//! files shipped with the game (0 = empty, 1 = black, 2 = white).

use derive_more::{Display, Error};

use crate::types::{Cell, Color};

/// A validated initial board layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: usize,
    cells: Vec<Cell>,
}

/// Rejected initial layout.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidLayoutError {
    /// The layout contains no rows.
    #[display("layout has no rows")]
    Empty,
    /// One row's length differs from the number of rows.
    #[display("layout is not square: row {row} has {found} cells, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Expected row length (the number of rows).
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// A raw cell value outside the 0/1/2 encoding.
    #[display("invalid cell value {value} at ({x}, {y})")]
    InvalidCell {
        /// Column of the offending cell.
        x: usize,
        /// Row of the offending cell.
        y: usize,
        /// The rejected raw value.
        value: u8,
    },
    /// Board size unsuitable for the standard four-stone opening.
    #[display("no standard opening for board size {size}: size must be even and at least 4")]
    UnsupportedSize {
        /// The rejected size.
        size: usize,
    },
}

impl Layout {
    /// Builds a layout from rows of cells.
    ///
    /// The grid must be non-empty and square.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, InvalidLayoutError> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidLayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(InvalidLayoutError::NotSquare {
                    row: y,
                    expected: size,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Builds a layout from a raw 0/1/2 grid.
    pub fn from_grid(rows: &[Vec<u8>]) -> Result<Self, InvalidLayoutError> {
        let mut decoded = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (x, &value) in row.iter().enumerate() {
                let cell = match value {
                    0 => Cell::Empty,
                    1 => Cell::Stone(Color::Black),
                    2 => Cell::Stone(Color::White),
                    _ => return Err(InvalidLayoutError::InvalidCell { x, y, value }),
                };
                cells.push(cell);
            }
            decoded.push(cells);
        }
        Self::new(decoded)
    }

    /// The classic four-stone opening for an even board size of at least 4:
    /// two white stones on the falling diagonal of the center square, two
    /// black stones on the rising one.
    pub fn standard(size: usize) -> Result<Self, InvalidLayoutError> {
        if size < 4 || size % 2 != 0 {
            return Err(InvalidLayoutError::UnsupportedSize { size });
        }

        let mut cells = vec![Cell::Empty; size * size];
        let hi = size / 2;
        let lo = hi - 1;
        cells[lo * size + lo] = Cell::Stone(Color::White);
        cells[hi * size + hi] = Cell::Stone(Color::White);
        cells[lo * size + hi] = Cell::Stone(Color::Black);
        cells[hi * size + lo] = Cell::Stone(Color::Black);

        Ok(Self { size, cells })
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
