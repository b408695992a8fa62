//! Trivia Tower core - memory-matching trivia game logic
//!
//! A fixed sequence of levels, each dealing a shuffled deck of
//! term/definition cards. The player flips two cards at a time looking for
//! matching pairs against a countdown, building combos and spending a
//! limited number of hints.
//!
//! # Architecture
//!
//! - **Controller**: [`GameController`] owns all mutable state
//! - **Presentation**: [`Presentation`] receives display requests
//! - **Scheduling**: [`Scheduler`] fires deferred [`GameTimer`]s
//! - **Levels**: [`Level`]/[`Pair`] data, loadable through [`GameConfig`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use trivia_tower_core::{GameConfig, GameController, Level, TimerQueue};
//!
//! let config = GameConfig::new(vec![Level::from_pairs([("A", "a")], 60, 1)]);
//! let mut game = GameController::with_seed(config, (), TimerQueue::new(), 7);
//! game.start().expect("level 0 is valid");
//! game.advance(Duration::from_secs(1));
//! assert_eq!(*game.state().seconds_remaining(), 59);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod card;
mod config;
mod controller;
mod error;
mod level;
mod pairing;
mod presentation;
mod schedule;
mod scoring;
mod state;

// Crate-level exports - Controller
pub use controller::{COUNTDOWN_PERIOD, GameController};

// Crate-level exports - Cards and matching
pub use card::{Card, CardId, CardState, Deck};
pub use pairing::PartnerLookup;

// Crate-level exports - Level data and configuration
pub use config::{ConfigError, GameConfig, Link, Timing, charity_links};
pub use level::{Level, LevelError, Pair, water_levels};

// Crate-level exports - State and scoring
pub use error::GameError;
pub use scoring::{
    COMBO_BONUS_STEP, DECAY_PENALTY, MATCH_POINTS, MISMATCH_PENALTY, MatchAward, Scoreboard,
    combo_bonus,
};
pub use state::{GameState, LevelPhase, Resolution};

// Crate-level exports - Collaborator seams
pub use presentation::{CardView, Control, Presentation, VisualState, combo_text, format_clock};
pub use schedule::{GameTimer, Scheduler, TimerId, TimerQueue};

/// Headless presentation: every request is a no-op.
impl Presentation for () {}
