//! Terminal driver for the Othello engine.
//!
//! Stands in for the rendering/UI collaborator: it feeds typed coordinates
//! into the human players' input channels and renders the controller's
//! event stream to stdout.

#![warn(missing_docs)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use othello::{Cli, Command, GameController, GameEvent, load_layout};
use othello_core::{Cell, Color, FlipSet, Layout, Pos};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            black,
            white,
            layout,
            size,
            ai_delay_ms,
        } => play(black, white, layout, size, ai_delay_ms).await,
    }
}

async fn play(
    black: String,
    white: String,
    layout_path: Option<PathBuf>,
    size: usize,
    ai_delay_ms: u64,
) -> Result<()> {
    let layout = match layout_path {
        Some(path) => load_layout(&path)?,
        None => Layout::standard(size)?,
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut controller = GameController::new(&layout, event_tx)
        .with_ai_delay(Duration::from_millis(ai_delay_ms));
    let inputs = controller.start(&black, &white)?;

    // One stdin stream serves both colors; only the active human player is
    // awaiting its channel, and players drop stale coordinates themselves.
    let senders: Vec<_> = [inputs.black, inputs.white].into_iter().flatten().collect();
    let reader = tokio::spawn(forward_stdin(senders));

    info!(black, white, "game starting");
    let mut view = BoardView::new(&layout);
    println!("{}", view.render());

    let game = tokio::spawn(async move { controller.run().await });

    while let Some(event) = event_rx.recv().await {
        match event {
            GameEvent::TurnStarted(color) => {
                println!("{color} to move (enter `x y`):");
            }
            GameEvent::MoveApplied { pos, color, flips } => {
                view.apply(pos, color, &flips);
                println!("{color} played {pos}, flipping {} stone(s)", flips.flipped_count());
                println!("{}", view.render());
            }
            GameEvent::StoneCounts(counts) => {
                println!("score: {counts}");
            }
            GameEvent::IllegalMove { pos, color, reason } => {
                println!("{color} cannot play {pos}: {reason}");
            }
            GameEvent::Passed(color) => {
                println!("{color} has no legal move and passes");
            }
            GameEvent::Finished(counts) => {
                let verdict = match counts.black.cmp(&counts.white) {
                    std::cmp::Ordering::Greater => "Black wins".to_string(),
                    std::cmp::Ordering::Less => "White wins".to_string(),
                    std::cmp::Ordering::Equal => "draw".to_string(),
                };
                println!("game over: {counts} - {verdict}");
                break;
            }
            GameEvent::WasReset => {
                debug!("reset acknowledged");
            }
        }
    }

    game.await??;
    reader.abort();
    Ok(())
}

/// Parses `x y` lines from stdin into board coordinates and forwards them
/// to every human input channel.
async fn forward_stdin(senders: Vec<mpsc::UnboundedSender<Pos>>) {
    if senders.is_empty() {
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut parts = line.split_whitespace();
        let parsed = match (parts.next(), parts.next()) {
            (Some(x), Some(y)) => x.parse().ok().zip(y.parse().ok()),
            _ => None,
        };

        match parsed {
            Some((x, y)) => {
                let pos = Pos::new(x, y);
                for sender in &senders {
                    if sender.send(pos).is_err() {
                        return;
                    }
                }
            }
            None => warn!(line = %line, "expected two numbers, e.g. `2 3`"),
        }
    }
}

/// Text mirror of the board, updated from applied moves the same way the
/// excluded 3D renderer animates them.
struct BoardView {
    size: usize,
    cells: Vec<char>,
}

impl BoardView {
    fn new(layout: &Layout) -> Self {
        let cells = layout
            .cells()
            .iter()
            .map(|cell| Self::glyph(*cell))
            .collect();
        Self {
            size: layout.size(),
            cells,
        }
    }

    fn glyph(cell: Cell) -> char {
        match cell {
            Cell::Empty => '.',
            Cell::Stone(Color::Black) => 'B',
            Cell::Stone(Color::White) => 'W',
        }
    }

    fn apply(&mut self, pos: Pos, color: Color, flips: &FlipSet) {
        let glyph = Self::glyph(Cell::Stone(color));
        self.cells[pos.y * self.size + pos.x] = glyph;
        for flipped in flips.positions() {
            self.cells[flipped.y * self.size + flipped.x] = glyph;
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.size {
            for x in 0..self.size {
                out.push(self.cells[y * self.size + x]);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
