//! Engine error types.

use derive_more::{Display, Error};

use crate::types::{Color, Pos};

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// The target cell already holds a stone.
    #[display("the cell is already occupied")]
    Occupied,
    /// The coordinate lies outside the board.
    #[display("the coordinate is outside the board")]
    OutOfBounds,
    /// The placement would capture no opposing stones.
    #[display("the move captures no stones")]
    NoCapture,
}

/// A placement the board refused to apply.
///
/// The board is left untouched when this is returned; the caller may retry
/// with a different coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("illegal move by {color} at {pos}: {reason}")]
pub struct IllegalMoveError {
    /// The attempted coordinate.
    pub pos: Pos,
    /// The acting color.
    pub color: Color,
    /// Why the placement was rejected.
    pub reason: MoveRejection,
}
