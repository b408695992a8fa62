//! Terminal rendition of the game's display requests.
//!
//! The controller pushes updates here; [`super::ui`] reads them back when
//! drawing a frame. Nothing in this file makes game decisions.

use derive_getters::Getters;
use tracing::debug;
use trivia_tower_core::{CardId, CardView, Control, Link, Presentation, VisualState, combo_text};

/// One card as it currently looks on screen.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CardCell {
    view: CardView,
    visual: VisualState,
}

/// Modal message covering the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// A level was cleared (1-based number).
    LevelComplete(usize),
    /// The countdown ran out.
    Timeout,
    /// The last level is done.
    AllComplete {
        /// Score at the end of the tower.
        score: u32,
        /// Best streak of the session.
        max_combo: u32,
    },
}

impl Dialog {
    /// Title bar text.
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::LevelComplete(_) => "Level complete",
            Dialog::Timeout => "Time's up",
            Dialog::AllComplete { .. } => "Tower complete",
        }
    }

    /// Body text; `links` are listed under a cleared level.
    pub fn body(&self, links: &[Link]) -> String {
        match self {
            Dialog::LevelComplete(level) => {
                let mut body = format!("Level {} complete!\n\n", level);
                if !links.is_empty() {
                    body.push_str("Interested to learn more? Visit here:\n");
                    for link in links {
                        body.push_str(&format!("{}: {}\n", link.label(), link.url()));
                    }
                    body.push('\n');
                }
                body.push_str("Press any key to continue.");
                body
            }
            Dialog::Timeout => {
                "Time's up! Press 'r' to try again or 'n' for the next level.".to_string()
            }
            Dialog::AllComplete { score, max_combo } => format!(
                "All levels complete!\n\nFinal Score: {} | Max Combo: x{}\n\nPress 'r' to play again or 'q' to quit.",
                score, max_combo
            ),
        }
    }
}

/// Everything the terminal shows, as last reported by the controller.
#[derive(Debug, Clone, Default, Getters)]
pub struct TerminalPresentation {
    cards: Vec<CardCell>,
    timer_text: String,
    score: u32,
    combo_text: String,
    combo_highlight: bool,
    hints: u32,
    hint_enabled: bool,
    next_enabled: bool,
    dialog: Option<Dialog>,
    celebrating: bool,
}

impl TerminalPresentation {
    /// Creates an empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the current dialog, returning what it was.
    pub fn close_dialog(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }
}

impl Presentation for TerminalPresentation {
    fn render_cards(&mut self, cards: &[CardView]) {
        debug!(cards = cards.len(), "Rendering board");
        self.cards = cards
            .iter()
            .cloned()
            .map(|view| CardCell {
                view,
                visual: VisualState::Unmatched,
            })
            .collect();
        self.dialog = None;
        self.celebrating = false;
    }

    fn set_card_visual_state(&mut self, card: CardId, state: VisualState) {
        // A card missing from the grid is simply not drawn.
        if let Some(cell) = self.cards.get_mut(card.index()) {
            cell.visual = state;
        }
    }

    fn update_timer_text(&mut self, text: &str) {
        self.timer_text = text.to_string();
    }

    fn update_score_text(&mut self, score: u32) {
        self.score = score;
    }

    fn update_combo_text(&mut self, combo: u32, bonus: u32) {
        self.combo_text = combo_text(combo, bonus);
    }

    fn set_combo_highlight(&mut self, on: bool) {
        self.combo_highlight = on;
    }

    fn update_hint_count(&mut self, hints: u32) {
        self.hints = hints;
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        match control {
            Control::Hint => self.hint_enabled = enabled,
            Control::NextLevel => self.next_enabled = enabled,
        }
    }

    fn show_level_complete_dialog(&mut self, level_number: usize) {
        self.dialog = Some(Dialog::LevelComplete(level_number));
    }

    fn show_all_levels_complete_notice(&mut self, final_score: u32, max_combo: u32) {
        self.dialog = Some(Dialog::AllComplete {
            score: final_score,
            max_combo,
        });
    }

    fn show_timeout_notice(&mut self) {
        self.dialog = Some(Dialog::Timeout);
    }

    fn trigger_celebration_effect(&mut self) {
        self.celebrating = true;
    }
}
