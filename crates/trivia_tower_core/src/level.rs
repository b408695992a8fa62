//! Level definitions: matching pairs plus a time and hint budget.
//!
//! Levels are plain data. They are checked with [`Level::validate`] right
//! before a level starts so a malformed board is never dealt.

use std::collections::HashSet;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Two labels that are the correct match for each other.
///
/// Serialized as a two-element array: `["borehole", "deep water access"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Pair {
    /// First label of the pair.
    term_a: String,
    /// Second label of the pair.
    term_b: String,
}

impl Pair {
    /// Creates a pair from two labels.
    pub fn new(term_a: impl Into<String>, term_b: impl Into<String>) -> Self {
        Self {
            term_a: term_a.into(),
            term_b: term_b.into(),
        }
    }

    /// Returns both labels in declaration order.
    pub fn labels(&self) -> [&str; 2] {
        [&self.term_a, &self.term_b]
    }
}

impl From<(String, String)> for Pair {
    fn from((term_a, term_b): (String, String)) -> Self {
        Self { term_a, term_b }
    }
}

impl From<Pair> for (String, String) {
    fn from(pair: Pair) -> Self {
        (pair.term_a, pair.term_b)
    }
}

/// One level of the tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Level {
    /// Pairs dealt on this level.
    pairs: Vec<Pair>,
    /// Countdown budget in seconds.
    time: u32,
    /// Number of hints the player may use.
    hints: u32,
}

impl Level {
    /// Creates a level from its pairs and budgets.
    pub fn new(pairs: Vec<Pair>, time: u32, hints: u32) -> Self {
        Self { pairs, time, hints }
    }

    /// Creates a level from `(a, b)` label tuples.
    pub fn from_pairs<I, A, B>(pairs: I, time: u32, hints: u32) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let pairs = pairs.into_iter().map(|(a, b)| Pair::new(a, b)).collect();
        Self::new(pairs, time, hints)
    }

    /// Number of pairs needed to clear the level.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// All labels, flattened pair by pair.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().flat_map(|pair| pair.labels())
    }

    /// Checks that the level can be dealt.
    ///
    /// `number` is the 1-based level number used in error messages.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelError`] for empty pairs, a zero time budget, a label
    /// paired with itself, or a label that appears more than once.
    #[instrument(skip(self), fields(pairs = self.pairs.len(), time = self.time))]
    pub fn validate(&self, number: usize) -> Result<(), LevelError> {
        if self.pairs.is_empty() {
            return Err(LevelError::NoPairs { number });
        }
        if self.time == 0 {
            return Err(LevelError::ZeroTime { number });
        }

        let mut seen = HashSet::with_capacity(self.pairs.len() * 2);
        for pair in &self.pairs {
            if pair.term_a == pair.term_b {
                return Err(LevelError::SelfPair {
                    number,
                    label: pair.term_a.clone(),
                });
            }
            for label in pair.labels() {
                if !seen.insert(label) {
                    return Err(LevelError::DuplicateLabel {
                        number,
                        label: label.to_string(),
                    });
                }
            }
        }

        debug!(number, "Level validated");
        Ok(())
    }
}

/// Malformed level data, reported when the level is about to start.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LevelError {
    /// The level has no pairs to deal.
    #[display("Level {} has no pairs", number)]
    NoPairs {
        /// 1-based level number.
        number: usize,
    },

    /// The level has a zero-second countdown.
    #[display("Level {} has a time budget of 0 seconds", number)]
    ZeroTime {
        /// 1-based level number.
        number: usize,
    },

    /// A pair uses the same label on both sides.
    #[display("Level {} pairs {:?} with itself", number, label)]
    SelfPair {
        /// 1-based level number.
        number: usize,
        /// The offending label.
        label: String,
    },

    /// A label appears in more than one place.
    #[display("Level {} uses label {:?} more than once", number, label)]
    DuplicateLabel {
        /// 1-based level number.
        number: usize,
        /// The repeated label.
        label: String,
    },
}

impl std::error::Error for LevelError {}

/// The three built-in levels of the water trivia tower.
pub fn water_levels() -> Vec<Level> {
    vec![
        Level::from_pairs(
            [
                ("borehole", "deep water access"),
                ("Ethiopia", "charity: water project"),
                ("well", "groundwater"),
                ("water pump", "clean water"),
            ],
            60,
            2,
        ),
        Level::from_pairs(
            [
                ("latrine", "sanitation"),
                ("filter", "purification"),
                ("handwashing", "hygiene"),
                ("rainwater", "collection"),
                ("Africa", "Asia"),
            ],
            70,
            2,
        ),
        Level::from_pairs(
            [
                ("pipeline", "distribution"),
                ("solar pump", "renewable energy"),
                ("maintenance", "sustainability"),
                ("community", "ownership"),
                ("training", "education"),
                ("monitoring", "impact"),
            ],
            80,
            1,
        ),
    ]
}
