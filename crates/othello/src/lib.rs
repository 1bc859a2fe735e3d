//! Othello turn state machine and players.
//!
//! Builds the interactive game on top of [`othello_core`]:
//!
//! - **Players**: the [`Player`] trait with a channel-driven human variant
//!   and a uniform-random AI variant.
//! - **Controller**: the [`GameController`] turn state machine, which owns
//!   the board, drives turn rotation with pass and finish detection, and
//!   pushes [`GameEvent`]s to its observer channel.
//! - **Layout loading**: JSON layout files in the original 0/1/2 grid
//!   format.
//!
//! Rendering and input resolution are external collaborators: they feed
//! coordinates into the human player's channel and consume the event
//! stream. The bundled CLI binary is one such collaborator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod controller;
mod layout_io;
mod players;

pub use cli::{Cli, Command};
pub use controller::{GameController, GameEvent, HumanInputs, Phase, StartError};
pub use layout_io::{LayoutFileError, load_layout};
pub use players::{
    HumanPlayer, Player, PlayerError, PlayerKind, RandomAiPlayer, UnknownPlayerTypeError,
    build_player,
};
