//! Common error types for the Lyricle engine

use thiserror::Error;

/// Common result type for Lyricle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine and its collaborators
///
/// The first four variants are business-rule outcomes: deterministic and
/// never worth retrying. Everything else is an infrastructure failure that
/// is passed through unchanged from the backing store.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing input (empty ids, empty word)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced game or song does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Guess does not match any guessable word of the song
    #[error("Invalid word: {0}")]
    InvalidWord(String),

    /// Same normalized word already guessed by this player for this game
    #[error("Duplicate guess '{word}' for player {player_id} in game {game_id}")]
    DuplicateGuess {
        game_id: String,
        player_id: String,
        word: String,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (e.g. a poisoned lock in an in-process store)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for the business-rule kinds (validation, not found, invalid word,
    /// duplicate guess); false for store and configuration failures.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::NotFound(_)
                | Error::InvalidWord(_)
                | Error::DuplicateGuess { .. }
        )
    }
}
