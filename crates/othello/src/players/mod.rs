//! Player trait and implementations.

mod human;
mod random_ai;

pub use human::HumanPlayer;
pub use random_ai::RandomAiPlayer;

use std::str::FromStr;
use std::time::Duration;

use derive_more::{Display, Error};
use othello_core::{Board, Color, Pos};
use tokio::sync::mpsc;

/// A turn participant bound to one color.
///
/// The controller awaits [`Player::next_move`] for exactly one turn; the
/// returned future *is* the turn phase. Cancelling the phase is dropping
/// the future: once dropped, no stale decision can reach the board.
/// Teardown is `Drop`: a discarded human player closes its input channel.
#[async_trait::async_trait]
pub trait Player: Send {
    /// The color this player moves for.
    fn color(&self) -> Color;

    /// Display name for logging and the UI boundary.
    fn name(&self) -> &str;

    /// Produces this turn's move.
    ///
    /// Players only read the board; the controller validates and applies
    /// the proposal, so an illegal human proposal comes straight back to
    /// this method on retry.
    async fn next_move(&mut self, board: &Board) -> Result<Pos, PlayerError>;

    /// Marks the end of an accepted turn.
    ///
    /// The controller calls this once a proposal has been applied. The
    /// human player uses it to mark still-queued coordinates as stale so
    /// they cannot act on a later turn; it is idempotent and safe to call
    /// before the first turn. Automated players need no cleanup.
    fn end_turn(&mut self) {}
}

/// Failure inside a player while producing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlayerError {
    /// The human input channel closed before a coordinate arrived.
    #[display("input channel closed before a move was chosen")]
    InputClosed,
    /// An automated player was activated with nothing to play.
    ///
    /// The controller only activates colors that have a legal move, so this
    /// signals an internal inconsistency rather than a game state.
    #[display("{color} was asked to move but has no legal move")]
    NoLegalMove {
        /// The color that had no candidates.
        color: Color,
    },
}

/// The closed set of player variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves arrive from an external input source.
    Human,
    /// Uniform-random choice among legal moves.
    #[strum(serialize = "random")]
    RandomAi,
}

impl PlayerKind {
    /// Parses a player kind name (`"human"` or `"random"`).
    pub fn parse(name: &str) -> Result<Self, UnknownPlayerTypeError> {
        Self::from_str(name).map_err(|_| UnknownPlayerTypeError {
            name: name.to_string(),
        })
    }
}

/// The player factory was asked for a kind it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown player type {name:?} (expected \"human\" or \"random\")")]
pub struct UnknownPlayerTypeError {
    /// The unrecognized kind name.
    pub name: String,
}

/// Constructs a player of the given kind for `color`.
///
/// For a human player the returned sender is the channel the external input
/// layer delivers coordinates on; automated players need no input and
/// return `None`. `ai_delay` paces automated moves and may be zero.
pub fn build_player(
    kind: PlayerKind,
    color: Color,
    ai_delay: Duration,
) -> (Box<dyn Player>, Option<mpsc::UnboundedSender<Pos>>) {
    match kind {
        PlayerKind::Human => {
            let (input_tx, input_rx) = mpsc::unbounded_channel();
            (Box::new(HumanPlayer::new(color, input_rx)), Some(input_tx))
        }
        PlayerKind::RandomAi => (Box::new(RandomAiPlayer::new(color, ai_delay)), None),
    }
}
