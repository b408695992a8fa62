//! Shared helpers for controller tests.

#![allow(dead_code)]

use std::time::Duration;

use trivia_tower_core::{
    CardId, CardView, Control, GameConfig, GameController, Level, Presentation, TimerQueue,
    Timing, VisualState,
};

/// One display request seen by [`RecordingPresentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Cards(Vec<CardView>),
    Visual(CardId, VisualState),
    Timer(String),
    Score(u32),
    Combo(u32, u32),
    ComboHighlight(bool),
    Hints(u32),
    Enabled(Control, bool),
    LevelComplete(usize),
    AllComplete(u32, u32),
    Timeout,
    Celebration,
}

/// Presentation double that records every request in order.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub shown: Vec<Shown>,
}

impl RecordingPresentation {
    pub fn count(&self, wanted: &Shown) -> usize {
        self.shown.iter().filter(|s| *s == wanted).count()
    }

    pub fn last_score(&self) -> Option<u32> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Score(score) => Some(*score),
            _ => None,
        })
    }

    pub fn last_visual(&self, card: CardId) -> Option<VisualState> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Visual(id, state) if *id == card => Some(*state),
            _ => None,
        })
    }

    pub fn last_enabled(&self, control: Control) -> Option<bool> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Enabled(c, enabled) if *c == control => Some(*enabled),
            _ => None,
        })
    }

    pub fn last_cards(&self) -> Option<&[CardView]> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Cards(cards) => Some(cards.as_slice()),
            _ => None,
        })
    }
}

impl Presentation for RecordingPresentation {
    fn render_cards(&mut self, cards: &[CardView]) {
        self.shown.push(Shown::Cards(cards.to_vec()));
    }

    fn set_card_visual_state(&mut self, card: CardId, state: VisualState) {
        self.shown.push(Shown::Visual(card, state));
    }

    fn update_timer_text(&mut self, text: &str) {
        self.shown.push(Shown::Timer(text.to_string()));
    }

    fn update_score_text(&mut self, score: u32) {
        self.shown.push(Shown::Score(score));
    }

    fn update_combo_text(&mut self, combo: u32, bonus: u32) {
        self.shown.push(Shown::Combo(combo, bonus));
    }

    fn set_combo_highlight(&mut self, on: bool) {
        self.shown.push(Shown::ComboHighlight(on));
    }

    fn update_hint_count(&mut self, hints: u32) {
        self.shown.push(Shown::Hints(hints));
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.shown.push(Shown::Enabled(control, enabled));
    }

    fn show_level_complete_dialog(&mut self, level_number: usize) {
        self.shown.push(Shown::LevelComplete(level_number));
    }

    fn show_all_levels_complete_notice(&mut self, final_score: u32, max_combo: u32) {
        self.shown.push(Shown::AllComplete(final_score, max_combo));
    }

    fn show_timeout_notice(&mut self) {
        self.shown.push(Shown::Timeout);
    }

    fn trigger_celebration_effect(&mut self) {
        self.shown.push(Shown::Celebration);
    }
}

pub type TestGame = GameController<RecordingPresentation, TimerQueue>;

/// The two-pair level used throughout: A/a and B/b, 60 s, 1 hint.
pub fn two_pair_level() -> Level {
    Level::from_pairs([("A", "a"), ("B", "b")], 60, 1)
}

/// Builds and starts a seeded game over `levels`.
pub fn started(levels: Vec<Level>) -> TestGame {
    let mut game = GameController::with_seed(
        GameConfig::new(levels),
        RecordingPresentation::default(),
        TimerQueue::new(),
        42,
    );
    game.start().expect("levels are valid");
    game
}

/// Same as [`started`] with a custom timing table.
pub fn started_with_timing(levels: Vec<Level>, timing: Timing) -> TestGame {
    let mut game = GameController::with_seed(
        GameConfig::new(levels).with_timing(timing),
        RecordingPresentation::default(),
        TimerQueue::new(),
        42,
    );
    game.start().expect("levels are valid");
    game
}

/// Id of the card showing `label`.
pub fn card(game: &TestGame, label: &str) -> CardId {
    *game
        .deck()
        .find(label)
        .unwrap_or_else(|| panic!("no card labelled {label}"))
        .id()
}

/// Flips two cards by label.
pub fn flip(game: &mut TestGame, first: &str, second: &str) {
    let first = card(game, first);
    let second = card(game, second);
    game.select_card(first);
    game.select_card(second);
}

/// Lets every reveal delay run out (but less than a countdown second).
pub fn settle(game: &mut TestGame) {
    game.advance(Duration::from_millis(900));
}
