//! Baseline automated player: uniform-random over the legal set.

use std::time::Duration;

use othello_core::{Board, Color, Pos};
use rand::seq::IndexedRandom;
use tracing::debug;

use super::{Player, PlayerError};

/// Picks uniformly at random among the currently legal moves.
///
/// Deliberately not strategic; it exists as a baseline opponent. The pacing
/// delay only makes automated play visibly paced for an interactive UI and
/// should be zero in non-interactive contexts.
pub struct RandomAiPlayer {
    color: Color,
    name: String,
    delay: Duration,
}

impl RandomAiPlayer {
    /// Creates a random player for `color` with the given pacing delay.
    pub fn new(color: Color, delay: Duration) -> Self {
        Self {
            color,
            name: format!("Random AI ({color})"),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomAiPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn next_move(&mut self, board: &Board) -> Result<Pos, PlayerError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let candidates = board.legal_positions(self.color);
        let chosen = candidates
            .choose(&mut rand::rng())
            .copied()
            .ok_or(PlayerError::NoLegalMove { color: self.color })?;

        debug!(player = %self.name, %chosen, options = candidates.len(), "AI chose move");
        Ok(chosen)
    }
}
