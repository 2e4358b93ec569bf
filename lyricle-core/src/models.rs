//! Domain models shared between the engine and its collaborators

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Song content consumed read-only by the engine
///
/// `lyrics` is `None` for instrumental tracks; the engine treats that as an
/// empty section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub lyrics: Option<String>,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        lyrics: Option<impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            lyrics: lyrics.map(Into::into),
        }
    }
}

/// A daily game: one song on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    pub song: Song,
}

/// A stored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub guid: Uuid,
    pub game_id: String,
    pub player_id: String,
    /// Trimmed word as submitted by the player
    pub word: String,
    pub created_at: DateTime<Utc>,
    pub valid: bool,
}

/// A guess about to be inserted
///
/// `normalized_word` is the uniqueness key together with game and player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuess {
    pub guid: Uuid,
    pub game_id: String,
    pub player_id: String,
    pub word: String,
    pub normalized_word: String,
    pub created_at: DateTime<Utc>,
    pub valid: bool,
}

impl NewGuess {
    /// Convert into the stored representation
    pub fn into_guess(self) -> Guess {
        Guess {
            guid: self.guid,
            game_id: self.game_id,
            player_id: self.player_id,
            word: self.word,
            created_at: self.created_at,
            valid: self.valid,
        }
    }
}
