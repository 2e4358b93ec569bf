//! Game state projection
//!
//! `GameState` is recomputed from the song and the player's full guess
//! list on every read. Nothing here is stored or mutated incrementally.

use super::policy::{reveals, Reveals};
use super::progress::{calculate_game_progress, GameProgress, MaskedSong};
use crate::config::EngineConfig;
use crate::lyrics::{count_hits, normalize, update_masked_text};
use crate::models::{Guess, Song};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Occurrences of one guessed word in each section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessHit {
    pub word: String,
    pub title: usize,
    pub artist: usize,
    pub lyrics: usize,
}

impl GuessHit {
    pub fn total(&self) -> usize {
        self.title + self.artist + self.lyrics
    }
}

/// Everything a player sees for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub masked_title: String,
    pub masked_artist: String,
    pub masked_lyrics: String,
    /// Normalized forms of all valid guesses
    pub found_words: BTreeSet<String>,
    pub progress: GameProgress,
    pub is_complete: bool,
    pub reveals: Reveals,
    /// One entry per valid guess, in the order the guesses were given
    pub guess_hits: Vec<GuessHit>,
}

/// Normalized forms of the valid guesses
pub fn found_words<'a, I>(guesses: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Guess>,
{
    guesses
        .into_iter()
        .filter(|g| g.valid)
        .filter_map(|g| normalize(&g.word))
        .collect()
}

/// Project the state of a game from its song and a player's guesses
pub fn compute_game_state(song: &Song, guesses: &[Guess], config: &EngineConfig) -> GameState {
    let masked = MaskedSong::from_song(song);
    let found = found_words(guesses);
    let revealed: Vec<&str> = found.iter().map(String::as_str).collect();

    let progress = calculate_game_progress(&found, &masked, config);
    let reveals = reveals(
        &progress.title,
        &progress.artist,
        &progress.lyrics,
        &config.reveal_thresholds,
    );

    let guess_hits = guesses
        .iter()
        .filter(|g| g.valid)
        .map(|g| GuessHit {
            word: g.word.clone(),
            title: count_hits(&g.word, &masked.title),
            artist: count_hits(&g.word, &masked.artist),
            lyrics: count_hits(&g.word, &masked.lyrics),
        })
        .collect();

    debug!(
        found = found.len(),
        title = progress.title.percent,
        artist = progress.artist.percent,
        lyrics = progress.lyrics.percent,
        complete = progress.is_game_complete,
        "Computed game state"
    );

    GameState {
        masked_title: update_masked_text(&masked.title, &revealed),
        masked_artist: update_masked_text(&masked.artist, &revealed),
        masked_lyrics: update_masked_text(&masked.lyrics, &revealed),
        found_words: found,
        is_complete: progress.is_game_complete,
        progress,
        reveals,
        guess_hits,
    }
}
