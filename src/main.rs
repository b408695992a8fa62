//! Trivia Tower - terminal front end
//!
//! Plays the memory-matching game, or inspects level files.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use trivia_tower::run_tui;
use trivia_tower_core::GameConfig;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        None => run_tui(GameConfig::default(), None, Path::new("trivia_tower.log")),
        Some(Command::Play {
            levels,
            seed,
            log_file,
        }) => run_tui(load_config(levels.as_deref())?, seed, &log_file),
        Some(Command::Check { path }) => {
            init_stderr_logging();
            check(path)
        }
        Some(Command::Levels { levels }) => {
            init_stderr_logging();
            list_levels(load_config(levels.as_deref())?)
        }
    }
}

/// Logging for the non-interactive commands.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => Ok(GameConfig::from_file(path)?),
        None => Ok(GameConfig::default()),
    }
}

/// Validate a level file and report what it holds.
#[instrument(fields(path = %path.display()))]
fn check(path: PathBuf) -> Result<()> {
    let config = GameConfig::from_file(&path)?;
    config.validate()?;
    info!(levels = config.levels().len(), "Level file is valid");
    println!(
        "{}: {} level(s) OK",
        path.display(),
        config.levels().len()
    );
    Ok(())
}

fn list_levels(config: GameConfig) -> Result<()> {
    for (index, level) in config.levels().iter().enumerate() {
        println!(
            "Level {}: {} pairs, {}s, {} hint(s)",
            index + 1,
            level.pair_count(),
            level.time(),
            level.hints()
        );
        for pair in level.pairs() {
            println!("  {} <-> {}", pair.term_a(), pair.term_b());
        }
    }
    Ok(())
}
