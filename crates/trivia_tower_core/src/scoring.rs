//! Score, combo streak and the points rules.

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

/// Base points for every match.
pub const MATCH_POINTS: u32 = 10;

/// Bonus per streak step, paid from the second consecutive match on.
pub const COMBO_BONUS_STEP: u32 = 5;

/// Points lost on a mismatch.
pub const MISMATCH_PENALTY: u32 = 2;

/// Points lost on every passive decay tick.
pub const DECAY_PENALTY: u32 = 5;

/// Combo bonus for a match scored at streak `combo`.
pub fn combo_bonus(combo: u32) -> u32 {
    if combo > 1 { COMBO_BONUS_STEP * combo } else { 0 }
}

/// What a single match paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct MatchAward {
    /// Streak length including this match.
    combo: u32,
    /// Bonus on top of [`MATCH_POINTS`].
    bonus: u32,
}

impl MatchAward {
    /// Total points awarded.
    pub fn points(&self) -> u32 {
        MATCH_POINTS + self.bonus
    }
}

/// Cumulative score with the current and best streak.
///
/// The score never goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Scoreboard {
    score: u32,
    combo: u32,
    max_combo: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the streak and pays out a match.
    #[instrument(skip(self), fields(score = self.score, combo = self.combo))]
    pub fn record_match(&mut self) -> MatchAward {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        let award = MatchAward::new(self.combo, combo_bonus(self.combo));
        self.score = self.score.saturating_add(award.points());
        debug!(points = award.points(), total = self.score, "Match scored");
        award
    }

    /// Breaks the streak and applies the mismatch penalty.
    #[instrument(skip(self), fields(score = self.score, combo = self.combo))]
    pub fn record_mismatch(&mut self) {
        self.combo = 0;
        self.deduct(MISMATCH_PENALTY);
    }

    /// Removes points, flooring at zero.
    pub fn deduct(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Clears the current streak, keeping score and best streak.
    pub fn reset_streak(&mut self) {
        self.combo = 0;
    }

    /// Clears everything for a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
