//! # Game Errors
//!
//! Only startup can fail. Once [`Game::init`](crate::Game::init) returns,
//! every frame runs to completion.

use crankset_core::ConfigError;
use thiserror::Error;

use crate::console::ConsoleError;

/// Startup failures.
#[derive(Error, Debug)]
pub enum GameError {
    /// The console could not load the configured font.
    #[error("couldn't load font {path}: {reason}")]
    FontLoad {
        /// Requested font path.
        path: String,
        /// Console's explanation.
        reason: String,
    },

    /// The world could not be built.
    #[error(transparent)]
    Core(#[from] crankset_core::Error),

    /// Invalid game configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ConsoleError> for GameError {
    fn from(error: ConsoleError) -> Self {
        match error {
            ConsoleError::FontLoad { path, reason } => Self::FontLoad { path, reason },
        }
    }
}
