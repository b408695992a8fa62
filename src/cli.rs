//! Command-line interface for trivia_tower.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trivia Tower - a timed memory-matching trivia game
#[derive(Parser, Debug)]
#[command(name = "trivia_tower")]
#[command(about = "Match each term with its partner before time runs out", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play` with the built-in levels)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Level file (TOML, or JSON by extension). Uses the built-in water levels if omitted.
        #[arg(short, long)]
        levels: Option<PathBuf>,

        /// Seed for a repeatable shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write logs while the terminal is in use
        #[arg(long, default_value = "trivia_tower.log")]
        log_file: PathBuf,
    },

    /// Validate a level file without playing it
    Check {
        /// Level file to validate
        path: PathBuf,
    },

    /// List the levels that would be played
    Levels {
        /// Level file (TOML, or JSON by extension). Uses the built-in water levels if omitted.
        #[arg(short, long)]
        levels: Option<PathBuf>,
    },
}
