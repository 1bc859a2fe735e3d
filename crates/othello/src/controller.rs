//! Game controller: the turn state machine.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use derive_more::{Display, Error, From};
use othello_core::{Board, Color, FlipSet, Layout, MoveRejection, Pos, StoneCounts};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::players::{Player, PlayerKind, UnknownPlayerTypeError, build_player};

/// Rejected `start` request; the session state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum StartError {
    /// `start` was called outside [`Phase::NotStarted`]; the running (or
    /// finished) game must be reset before a new one can begin.
    #[display("a game has already been started; reset before starting again")]
    AlreadyStarted,
    /// A requested player kind is not recognized.
    #[display("{_0}")]
    UnknownPlayerType(UnknownPlayerTypeError),
}

/// Notifications the controller pushes to its observer channel.
///
/// One channel per controller; the rendering/UI collaborator consumes these
/// to draw the board, announce turns, and report errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Current per-color totals, after every successful placement and after
    /// a reset.
    StoneCounts(StoneCounts),
    /// A new turn phase began for this color.
    TurnStarted(Color),
    /// A placement was applied; `flips` lists exactly the captured cells,
    /// in canonical direction order, for animation.
    MoveApplied {
        /// The placement coordinate.
        pos: Pos,
        /// The acting color.
        color: Color,
        /// The rays actually flipped.
        flips: FlipSet,
    },
    /// The active player's proposal was rejected; the same player stays
    /// active and may try again.
    IllegalMove {
        /// The rejected coordinate.
        pos: Pos,
        /// The proposing color.
        color: Color,
        /// Why the board refused it.
        reason: MoveRejection,
    },
    /// A color was skipped because it has no legal move.
    Passed(Color),
    /// The game ended; final totals.
    Finished(StoneCounts),
    /// A reset completed.
    WasReset,
}

/// Turn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game running; `start` has not been called since construction or
    /// the last reset.
    NotStarted,
    /// Awaiting a move from the player of this color.
    AwaitingMove(Color),
    /// The game is over.
    Finished,
}

/// Channels for delivering coordinates to human players, one per color that
/// was started as human.
#[derive(Debug)]
pub struct HumanInputs {
    /// Input sender for Black, if Black is human.
    pub black: Option<mpsc::UnboundedSender<Pos>>,
    /// Input sender for White, if White is human.
    pub white: Option<mpsc::UnboundedSender<Pos>>,
}

/// Owns the board and both players and drives turn sequencing.
///
/// The board is mutated only here, in direct response to a validated move
/// or a reset; players receive it read-only. Everything runs on one task:
/// awaiting a move is a suspension, not a lock.
pub struct GameController {
    board: Board,
    players: Vec<Box<dyn Player>>,
    turn: usize,
    phase: Phase,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    ai_delay: Duration,
}

impl GameController {
    /// Creates a controller over a fresh board, pushing events to
    /// `event_tx`.
    pub fn new(layout: &Layout, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            board: Board::new(layout),
            players: Vec::new(),
            turn: 0,
            phase: Phase::NotStarted,
            event_tx,
            ai_delay: Duration::from_secs(1),
        }
    }

    /// Sets the pacing delay for automated players (default one second).
    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay = delay;
        self
    }

    /// Read access to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current turn state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a game is in progress.
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::AwaitingMove(_))
    }

    /// Builds both players and opens the game with Black to move.
    ///
    /// Only valid from [`Phase::NotStarted`]; a running or finished game
    /// must be reset first. Fails without touching any state if called in
    /// the wrong phase or if a requested kind is unknown.
    #[instrument(skip(self))]
    pub fn start(&mut self, black: &str, white: &str) -> Result<HumanInputs, StartError> {
        if self.phase != Phase::NotStarted {
            return Err(StartError::AlreadyStarted);
        }

        let black_kind = PlayerKind::parse(black)?;
        let white_kind = PlayerKind::parse(white)?;

        let (black_player, black_tx) = build_player(black_kind, Color::Black, self.ai_delay);
        let (white_player, white_tx) = build_player(white_kind, Color::White, self.ai_delay);

        info!(black = %black_player.name(), white = %white_player.name(), "starting game");
        self.players = vec![black_player, white_player];
        self.turn = 0;
        self.phase = Phase::AwaitingMove(Color::Black);

        Ok(HumanInputs {
            black: black_tx,
            white: white_tx,
        })
    }

    /// Runs the turn loop until the game finishes.
    ///
    /// Each iteration announces the turn, awaits the active player's move,
    /// applies it, and advances. An illegal proposal is reported on the
    /// event channel and the same player is re-awaited; the turn does not
    /// advance. Returns once [`GameEvent::Finished`] has been emitted, or
    /// with an error if a player or the observer channel fails.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let color = match self.phase {
                Phase::AwaitingMove(color) => color,
                Phase::Finished => return Ok(()),
                Phase::NotStarted => bail!("run() called before start()"),
            };

            self.emit(GameEvent::TurnStarted(color))?;

            let (pos, flips) = loop {
                let proposal = self.players[self.turn]
                    .next_move(&self.board)
                    .await
                    .with_context(|| format!("{color} player failed to produce a move"))?;

                match self.board.place_stone(proposal, color) {
                    Ok(flips) => break (proposal, flips),
                    Err(err) => {
                        warn!(%err, "rejected move proposal");
                        self.emit(GameEvent::IllegalMove {
                            pos: err.pos,
                            color: err.color,
                            reason: err.reason,
                        })?;
                    }
                }
            };

            // The accepted move closes this turn phase; anything the input
            // layer still has queued for this player is now stale.
            self.players[self.turn].end_turn();

            self.emit(GameEvent::MoveApplied { pos, color, flips })?;
            self.emit(GameEvent::StoneCounts(self.board.stone_counts()))?;
            self.advance_turn()?;
        }
    }

    /// Turn advancement: finish on a full board or a wipeout, otherwise
    /// rotate to the next color with a legal move, emitting a pass for each
    /// color skipped. A full rotation back to the mover re-activates it
    /// (the opponent passed); no movable color at all finishes the game.
    fn advance_turn(&mut self) -> Result<()> {
        if self.board.all_filled() || self.board.any_color_wiped_out() {
            return self.finish();
        }

        let rotation = self.players.len();
        for step in 1..=rotation {
            let candidate = (self.turn + step) % rotation;
            let color = self.players[candidate].color();

            if self.board.has_legal_move(color) {
                debug!(%color, "activating player");
                self.turn = candidate;
                self.phase = Phase::AwaitingMove(color);
                return Ok(());
            }

            if candidate != self.turn {
                info!(%color, "no legal move, passing");
                self.emit(GameEvent::Passed(color))?;
            }
        }

        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        let counts = self.board.stone_counts();
        info!(%counts, "game finished");
        self.phase = Phase::Finished;
        self.emit(GameEvent::Finished(counts))
    }

    /// Discards the players, restores the board from `layout`, and returns
    /// to [`Phase::NotStarted`].
    ///
    /// Dropping the players closes their input channels, so a coordinate
    /// chosen against the previous game can never reach the new board.
    #[instrument(skip(self, layout))]
    pub fn reset(&mut self, layout: &Layout) -> Result<()> {
        info!("resetting game");
        self.players.clear();
        self.turn = 0;
        self.phase = Phase::NotStarted;
        self.board.reset(layout);

        self.emit(GameEvent::StoneCounts(self.board.stone_counts()))?;
        self.emit(GameEvent::WasReset)
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("event observer channel closed")
    }
}
