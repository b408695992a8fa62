//! Trivia Tower terminal front end
//!
//! Drives the [`trivia_tower_core`] game controller from a ratatui screen.
//!
//! # Architecture
//!
//! - **Presentation**: [`TerminalPresentation`] records what the controller asks to show
//! - **App**: [`App`] maps key presses to controller operations and feeds it wall-clock time
//! - **UI**: stateless drawing of the app each frame
//!
//! # Example
//!
//! ```
//! use trivia_tower::App;
//! use trivia_tower_core::GameConfig;
//! use crossterm::event::KeyCode;
//!
//! let mut app = App::new(GameConfig::default(), Some(7)).unwrap();
//! app.handle_key(KeyCode::Right);
//! assert_eq!(app.cursor(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod tui;

pub use tui::{
    App, CardCell, Dialog, GRID_COLUMNS, TerminalGame, TerminalPresentation, move_cursor,
    run_tui,
};
