//! Rendering seam: everything the controller asks a frontend to show.
//!
//! Every method has an empty default body. A frontend that lacks a given
//! display target simply doesn't override it and the game stays playable.

use derive_getters::Getters;
use derive_new::new;

use crate::card::{CardId, CardState};

/// What a frontend needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, new)]
pub struct CardView {
    id: CardId,
    label: String,
}

/// Cosmetic state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum VisualState {
    /// Face down.
    Unmatched,
    /// Flipped, waiting for its partner.
    Selected,
    /// Part of a found pair.
    Matched,
    /// Highlighted by a hint.
    Hint,
    /// Part of a wrong guess.
    Error,
}

impl From<CardState> for VisualState {
    fn from(state: CardState) -> Self {
        match state {
            CardState::Unmatched => Self::Unmatched,
            CardState::Selected => Self::Selected,
            CardState::Matched => Self::Matched,
        }
    }
}

/// Buttons the controller enables and disables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Control {
    /// Request a hint.
    Hint,
    /// Advance to the next level.
    NextLevel,
}

/// Display requests made by the controller.
///
/// Cards report clicks by calling
/// [`GameController::select_card`](crate::GameController::select_card);
/// the level-complete dialog reports its dismissal through
/// [`GameController::dismiss_level_complete`](crate::GameController::dismiss_level_complete).
pub trait Presentation {
    /// Replaces the board with one card per entry, in order.
    fn render_cards(&mut self, _cards: &[CardView]) {}

    /// Restyles one card.
    fn set_card_visual_state(&mut self, _card: CardId, _state: VisualState) {}

    /// Shows the countdown, formatted `m:ss`.
    fn update_timer_text(&mut self, _text: &str) {}

    /// Shows the score.
    fn update_score_text(&mut self, _score: u32) {}

    /// Shows the streak and its bonus. Both are zero when the streak broke.
    fn update_combo_text(&mut self, _combo: u32, _bonus: u32) {}

    /// Toggles the combo banner highlight.
    fn set_combo_highlight(&mut self, _on: bool) {}

    /// Shows how many hints are left.
    fn update_hint_count(&mut self, _hints: u32) {}

    /// Enables or disables a button.
    fn set_control_enabled(&mut self, _control: Control, _enabled: bool) {}

    /// Announces a cleared level (1-based number).
    fn show_level_complete_dialog(&mut self, _level_number: usize) {}

    /// Announces the end of the tower.
    fn show_all_levels_complete_notice(&mut self, _final_score: u32, _max_combo: u32) {}

    /// Announces that the countdown ran out.
    fn show_timeout_notice(&mut self) {}

    /// Plays the celebration effect.
    fn trigger_celebration_effect(&mut self) {}
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Banner text for a streak; empty until the second consecutive match.
pub fn combo_text(combo: u32, bonus: u32) -> String {
    if combo > 1 {
        format!("Combo x{}! +{} bonus!", combo, bonus)
    } else {
        String::new()
    }
}
