//! Collaborator traits for the guess ledger
//!
//! The ledger never constructs its own collaborators; callers inject a song
//! provider and a guess store.

use crate::models::{Game, Guess, NewGuess};
use crate::Result;
use async_trait::async_trait;

/// Supplies the game (and its song) for a game id
#[async_trait]
pub trait SongProvider: Send + Sync {
    /// `Ok(None)` if no such game exists
    async fn find_game(&self, game_id: &str) -> Result<Option<Game>>;
}

/// Result of an insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Guess),
    /// A guess with the same (game, player, normalized word) already exists.
    /// Stores report their own unique-constraint violations this way.
    Conflict,
}

/// Guess persistence
///
/// Implementations must make the (game, player, normalized word) key
/// unique, so that concurrent inserts of the same key yield exactly one
/// `Inserted`.
#[async_trait]
pub trait GuessStore: Send + Sync {
    async fn find_guess(
        &self,
        game_id: &str,
        player_id: &str,
        normalized_word: &str,
    ) -> Result<Option<Guess>>;

    async fn insert_guess(&self, guess: NewGuess) -> Result<InsertOutcome>;

    /// All guesses of a player for a game, newest first
    async fn list_guesses(&self, game_id: &str, player_id: &str) -> Result<Vec<Guess>>;
}
