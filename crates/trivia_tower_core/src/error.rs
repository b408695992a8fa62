//! Errors raised by the controller.

use crate::level::LevelError;

/// Error that stops a level from starting.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The level data is malformed.
    #[display("Invalid level: {}", _0)]
    #[from]
    Level(LevelError),

    /// No level exists at the requested index.
    #[display("No level at index {} ({} configured)", index, count)]
    NoSuchLevel {
        /// Requested 0-based index.
        index: usize,
        /// Number of configured levels.
        count: usize,
    },
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Level(err) => Some(err),
            GameError::NoSuchLevel { .. } => None,
        }
    }
}
