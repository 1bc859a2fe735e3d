//! Human player fed by an external coordinate channel.

use othello_core::{Board, Color, Pos};
use tokio::sync::mpsc;
use tracing::debug;

use super::{Player, PlayerError};

/// Human player. The external input layer (pointer picking, CLI parsing)
/// resolves its interactions to board coordinates and sends them here.
pub struct HumanPlayer {
    color: Color,
    name: String,
    input_rx: mpsc::UnboundedReceiver<Pos>,
    /// Set by `end_turn`: everything queued before the next `next_move`
    /// call belongs to an earlier turn and must be discarded.
    drain_pending: bool,
}

impl HumanPlayer {
    /// Creates a human player reading coordinates from `input_rx`.
    pub fn new(color: Color, input_rx: mpsc::UnboundedReceiver<Pos>) -> Self {
        Self {
            color,
            name: format!("Human ({color})"),
            input_rx,
            drain_pending: false,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn next_move(&mut self, _board: &Board) -> Result<Pos, PlayerError> {
        // Coordinates that were already queued when the previous turn was
        // accepted are stale selections against an older board. Input for
        // the current turn is never dropped: a retry after a rejected
        // proposal and coordinates scripted ahead of the turn both stay
        // queued.
        if self.drain_pending {
            while let Ok(stale) = self.input_rx.try_recv() {
                debug!(player = %self.name, %stale, "discarding stale coordinate");
            }
            self.drain_pending = false;
        }

        // No timeout: the suspension lasts until the input layer reports a
        // choice or the channel closes. Coordinates are forwarded as-is;
        // the board's legality check rejects out-of-range ones.
        self.input_rx.recv().await.ok_or(PlayerError::InputClosed)
    }

    fn end_turn(&mut self) {
        self.drain_pending = true;
    }
}
