//! Mutable session state owned by the controller.

use derive_getters::Getters;

use crate::card::CardId;
use crate::scoring::Scoreboard;

/// Snapshot of a running session.
///
/// Only [`GameController`](crate::GameController) mutates it; callers read
/// it through the getters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct GameState {
    pub(crate) current_level_index: usize,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) hints_remaining: u32,
    pub(crate) seconds_remaining: u32,
    pub(crate) matched_pair_count: usize,
    pub(crate) first_selected: Option<CardId>,
    pub(crate) second_selected: Option<CardId>,
    pub(crate) board_locked: bool,
}

impl GameState {
    /// Cumulative score, never negative.
    pub fn score(&self) -> u32 {
        *self.scoreboard.score()
    }

    /// Current streak of consecutive matches.
    pub fn combo(&self) -> u32 {
        *self.scoreboard.combo()
    }

    /// Best streak this session.
    pub fn max_combo(&self) -> u32 {
        *self.scoreboard.max_combo()
    }

    pub(crate) fn clear_selection(&mut self) {
        self.first_selected = None;
        self.second_selected = None;
    }
}

/// Why a level stopped accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Resolution {
    /// Every pair was found.
    Won,
    /// The countdown reached zero.
    TimedOut,
}

/// Where the session is in the level lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum LevelPhase {
    /// Nothing dealt yet.
    #[default]
    #[display("idle")]
    Idle,
    /// Cards are in play and the countdown runs.
    #[display("active")]
    Active,
    /// The level ended; waiting on the player.
    #[display("resolving ({})", _0)]
    Resolving(Resolution),
    /// The completion dialog was dismissed and another level remains.
    #[display("next level ready")]
    NextLevelReady,
    /// The final level is behind the player.
    #[display("all levels complete")]
    AllLevelsComplete,
}

impl LevelPhase {
    /// True while cards and hints respond to input.
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// True when a next-level request is honoured.
    pub fn can_advance(self) -> bool {
        matches!(self, Self::Resolving(Resolution::TimedOut) | Self::NextLevelReady)
    }
}
