//! In-process collaborator
//!
//! Keeps games and guesses in mutex-guarded maps. The duplicate check and
//! the insert happen under one lock, which gives the same guarantee as a
//! unique index in a database.

use super::store::{GuessStore, InsertOutcome, SongProvider};
use crate::models::{Game, Guess, NewGuess};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

type GuessKey = (String, String, String);

#[derive(Default)]
struct Inner {
    games: HashMap<String, Game>,
    /// Insertion order
    guesses: Vec<Guess>,
    /// Unique key to position in `guesses`
    keys: HashMap<GuessKey, usize>,
}

/// Games and guesses held in memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a game
    pub fn add_game(&self, game: Game) -> Result<()> {
        self.lock()?.games.insert(game.id.clone(), game);
        Ok(())
    }

    /// Number of stored guesses across all games
    pub fn guess_count(&self) -> Result<usize> {
        Ok(self.lock()?.guesses.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

fn key(game_id: &str, player_id: &str, normalized_word: &str) -> GuessKey {
    (
        game_id.to_string(),
        player_id.to_string(),
        normalized_word.to_string(),
    )
}

#[async_trait]
impl SongProvider for MemoryStore {
    async fn find_game(&self, game_id: &str) -> Result<Option<Game>> {
        Ok(self.lock()?.games.get(game_id).cloned())
    }
}

#[async_trait]
impl GuessStore for MemoryStore {
    async fn find_guess(
        &self,
        game_id: &str,
        player_id: &str,
        normalized_word: &str,
    ) -> Result<Option<Guess>> {
        let inner = self.lock()?;
        Ok(inner
            .keys
            .get(&key(game_id, player_id, normalized_word))
            .map(|&index| inner.guesses[index].clone()))
    }

    async fn insert_guess(&self, guess: NewGuess) -> Result<InsertOutcome> {
        let k = key(&guess.game_id, &guess.player_id, &guess.normalized_word);
        let mut inner = self.lock()?;
        if inner.keys.contains_key(&k) {
            return Ok(InsertOutcome::Conflict);
        }
        let stored = guess.into_guess();
        let index = inner.guesses.len();
        inner.guesses.push(stored.clone());
        inner.keys.insert(k, index);
        Ok(InsertOutcome::Inserted(stored))
    }

    async fn list_guesses(&self, game_id: &str, player_id: &str) -> Result<Vec<Guess>> {
        Ok(self
            .lock()?
            .guesses
            .iter()
            .rev()
            .filter(|g| g.game_id == game_id && g.player_id == player_id)
            .cloned()
            .collect())
    }
}
