//! Guess ledger
//!
//! Accepts guesses for a game on behalf of a player. A guess is accepted
//! only if it matches a guessable word of the song, and at most once per
//! (game, player, normalized word). Duplicate detection is a pre-check plus
//! the store's own unique key: a unique-constraint conflict on insert is
//! reported exactly like a failed pre-check.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{GuessStore, InsertOutcome, SongProvider};

use crate::config::EngineConfig;
use crate::game::{compute_game_state, GameState, MaskedSong};
use crate::lyrics::{contains_word, normalize};
use crate::models::{Game, Guess, NewGuess};
use crate::{time, Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Guess acceptance over injected collaborators
#[derive(Clone)]
pub struct GuessLedger {
    songs: Arc<dyn SongProvider>,
    store: Arc<dyn GuessStore>,
    config: EngineConfig,
}

impl GuessLedger {
    pub fn new(
        songs: Arc<dyn SongProvider>,
        store: Arc<dyn GuessStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            songs,
            store,
            config,
        }
    }

    /// Validate and record a guess
    ///
    /// # Errors
    /// * `Validation` - empty game id, player id or (trimmed) word
    /// * `NotFound` - unknown game
    /// * `InvalidWord` - the word is not in the title, artist or lyrics
    /// * `DuplicateGuess` - this player already guessed this word
    /// * store errors are passed through
    pub async fn submit_guess(
        &self,
        game_id: &str,
        player_id: &str,
        raw_word: &str,
    ) -> Result<Guess> {
        validate_ids(game_id, player_id)?;
        let word = raw_word.trim();
        if word.is_empty() {
            return Err(Error::Validation("word must not be empty".to_string()));
        }

        let game = self.load_game(game_id).await?;

        let normalized = normalize(word).ok_or_else(|| {
            debug!(game_id, player_id, word, "Rejected guess without word characters");
            Error::InvalidWord(word.to_string())
        })?;

        let masked = MaskedSong::from_song(&game.song);
        if !masked.sections().iter().any(|s| contains_word(word, *s)) {
            debug!(game_id, player_id, word, "Rejected guess not in song");
            return Err(Error::InvalidWord(word.to_string()));
        }

        if self
            .store
            .find_guess(game_id, player_id, &normalized)
            .await?
            .is_some()
        {
            debug!(game_id, player_id, word, "Rejected duplicate guess");
            return Err(duplicate(game_id, player_id, &normalized));
        }

        let new_guess = NewGuess {
            guid: Uuid::new_v4(),
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            word: word.to_string(),
            normalized_word: normalized.clone(),
            created_at: time::now(),
            valid: true,
        };

        match self.store.insert_guess(new_guess).await? {
            InsertOutcome::Inserted(guess) => {
                info!(game_id, player_id, word = %guess.word, "Accepted guess");
                Ok(guess)
            }
            InsertOutcome::Conflict => {
                warn!(
                    game_id,
                    player_id,
                    word,
                    "Concurrent duplicate guess collapsed by unique key"
                );
                Err(duplicate(game_id, player_id, &normalized))
            }
        }
    }

    /// All guesses of a player for a game, newest first
    ///
    /// An unknown player simply has no guesses; an unknown game is `NotFound`.
    pub async fn get_player_guesses(&self, game_id: &str, player_id: &str) -> Result<Vec<Guess>> {
        validate_ids(game_id, player_id)?;
        self.load_game(game_id).await?;
        self.store.list_guesses(game_id, player_id).await
    }

    /// Current state of a game for a player, projected from all their guesses
    pub async fn game_state(&self, game_id: &str, player_id: &str) -> Result<GameState> {
        validate_ids(game_id, player_id)?;
        let game = self.load_game(game_id).await?;
        let mut guesses = self.store.list_guesses(game_id, player_id).await?;
        // Oldest first, so hit feedback reads in guess order
        guesses.reverse();
        Ok(compute_game_state(&game.song, &guesses, &self.config))
    }

    async fn load_game(&self, game_id: &str) -> Result<Game> {
        self.songs
            .find_game(game_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("game {}", game_id)))
    }
}

fn validate_ids(game_id: &str, player_id: &str) -> Result<()> {
    if game_id.trim().is_empty() {
        return Err(Error::Validation("game id must not be empty".to_string()));
    }
    if player_id.trim().is_empty() {
        return Err(Error::Validation("player id must not be empty".to_string()));
    }
    Ok(())
}

fn duplicate(game_id: &str, player_id: &str, normalized: &str) -> Error {
    Error::DuplicateGuess {
        game_id: game_id.to_string(),
        player_id: player_id.to_string(),
        word: normalized.to_string(),
    }
}
