//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Othello - two-player board game engine
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(about = "Othello game engine with human and random-AI players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Player kind for Black ("human" or "random")
        #[arg(long, default_value = "human")]
        black: String,

        /// Player kind for White ("human" or "random")
        #[arg(long, default_value = "random")]
        white: String,

        /// JSON layout file (grid of 0/1/2). Defaults to the standard
        /// opening for --size.
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Board size for the standard opening (even, at least 4)
        #[arg(long, default_value = "8")]
        size: usize,

        /// Pacing delay for automated players, in milliseconds
        #[arg(long, default_value = "1000")]
        ai_delay_ms: u64,
    },
}
