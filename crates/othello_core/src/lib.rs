//! Pure Othello game logic.
//!
//! This crate owns board state and the flip algorithm: legality checks,
//! directional ray computation, stone counting and end-of-game queries.
//! It performs no I/O and knows nothing about players or rendering;
//! the `othello` crate builds the turn state machine on top of it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod layout;
mod types;

pub use board::{Board, FlipSet, Ray};
pub use error::{IllegalMoveError, MoveRejection};
pub use layout::{InvalidLayoutError, Layout};
pub use types::{Cell, Color, Pos, StoneCounts};
