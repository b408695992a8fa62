//! Application state and key handling for the terminal game.

use std::time::Duration;

use crossterm::event::KeyCode;
use tracing::{debug, info, instrument, warn};
use trivia_tower_core::{CardId, GameConfig, GameController, GameError, LevelPhase, TimerQueue};

use super::input::move_cursor;
use super::presentation::{Dialog, TerminalPresentation};

/// The controller wired to the terminal presentation and a wall-clock-fed queue.
pub type TerminalGame = GameController<TerminalPresentation, TimerQueue>;

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: TerminalGame,
    cursor: usize,
    should_quit: bool,
    status_message: Option<String>,
}

impl App {
    /// Creates the app and deals the first level.
    ///
    /// # Errors
    ///
    /// Fails if the first level is missing or malformed.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, GameError> {
        let presentation = TerminalPresentation::new();
        let mut game = match seed {
            Some(seed) => GameController::with_seed(config, presentation, TimerQueue::new(), seed),
            None => GameController::new(config, presentation, TimerQueue::new()),
        };
        game.start()?;
        Ok(Self {
            game,
            cursor: 0,
            should_quit: false,
            status_message: None,
        })
    }

    /// The running game.
    pub fn game(&self) -> &TerminalGame {
        &self.game
    }

    /// What the terminal should show.
    pub fn screen(&self) -> &TerminalPresentation {
        self.game.presentation()
    }

    /// Index of the highlighted card.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Last error worth showing the player.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Text of the open dialog, if any.
    pub fn dialog_text(&self) -> Option<String> {
        self.screen()
            .dialog()
            .as_ref()
            .map(|dialog| dialog.body(self.game.config().links()))
    }

    /// Feeds elapsed wall-clock time to the game's timers.
    pub fn tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
    }

    /// Handles one key press.
    #[instrument(skip(self), fields(phase = %self.game.phase()))]
    pub fn handle_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
            info!("User quit");
            self.should_quit = true;
            return;
        }

        if self.screen().dialog().is_some() && self.handle_dialog_key(key) {
            return;
        }

        match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, self.game.deck().len(), key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                debug!(cursor = self.cursor, "Flipping card");
                self.game.select_card(CardId(self.cursor));
            }
            KeyCode::Char('h') => self.game.request_hint(),
            KeyCode::Char('n') => {
                let result = self.game.next_level();
                self.report(result);
            }
            KeyCode::Char('r') => {
                let result = self.game.reset();
                self.report(result);
            }
            _ => {}
        }
    }

    /// Returns true when the key was consumed by the dialog.
    fn handle_dialog_key(&mut self, key: KeyCode) -> bool {
        let dialog = *self.screen().dialog();
        match dialog {
            Some(Dialog::LevelComplete(_)) => {
                self.game.presentation_mut().close_dialog();
                self.game.dismiss_level_complete();
                true
            }
            Some(Dialog::Timeout) => {
                self.game.presentation_mut().close_dialog();
                // 'n' and 'r' act right away; anything else just closes.
                !matches!(key, KeyCode::Char('n') | KeyCode::Char('r'))
            }
            // The final notice stays up until the player resets or quits.
            Some(Dialog::AllComplete { .. }) => key != KeyCode::Char('r'),
            None => false,
        }
    }

    fn report(&mut self, result: Result<(), GameError>) {
        match result {
            Ok(()) => {
                self.cursor = self.cursor.min(self.game.deck().len().saturating_sub(1));
                self.status_message = None;
            }
            Err(e) => {
                warn!(error = %e, "Level could not start");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// True when the tower has been finished.
    pub fn finished(&self) -> bool {
        self.game.phase() == LevelPhase::AllLevelsComplete
    }
}
