//! SQLite song provider and guess store

use crate::ledger::{GuessStore, InsertOutcome, SongProvider};
use crate::models::{Game, Guess, NewGuess, Song};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Games, songs and guesses backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Schedule a game: stores its song and links it to the game id and date
    pub async fn insert_game(&self, game: &Game) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let song_id = sqlx::query("INSERT INTO songs (title, artist, lyrics) VALUES (?, ?, ?)")
            .bind(&game.song.title)
            .bind(&game.song.artist)
            .bind(&game.song.lyrics)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        sqlx::query("INSERT INTO games (guid, date, song_id) VALUES (?, ?, ?)")
            .bind(&game.id)
            .bind(game.date)
            .bind(song_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

fn guess_from_row(row: &SqliteRow) -> Result<Guess> {
    let guid_str: String = row.try_get("guid")?;
    let guid = Uuid::parse_str(&guid_str)
        .map_err(|e| Error::Internal(format!("Invalid guess guid {}: {}", guid_str, e)))?;

    Ok(Guess {
        guid,
        game_id: row.try_get("game_id")?,
        player_id: row.try_get("player_id")?,
        word: row.try_get("word")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        valid: row.try_get("valid")?,
    })
}

#[async_trait]
impl SongProvider for SqliteStore {
    async fn find_game(&self, game_id: &str) -> Result<Option<Game>> {
        let row = sqlx::query(
            r#"
            SELECT g.guid, g.date, s.title, s.artist, s.lyrics
            FROM games g
            JOIN songs s ON g.song_id = s.id
            WHERE g.guid = ?
            "#,
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Game {
                id: row.try_get("guid")?,
                date: row.try_get::<NaiveDate, _>("date")?,
                song: Song {
                    title: row.try_get("title")?,
                    artist: row.try_get("artist")?,
                    lyrics: row.try_get("lyrics")?,
                },
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl GuessStore for SqliteStore {
    async fn find_guess(
        &self,
        game_id: &str,
        player_id: &str,
        normalized_word: &str,
    ) -> Result<Option<Guess>> {
        let row = sqlx::query(
            r#"
            SELECT guid, game_id, player_id, word, valid, created_at
            FROM guesses
            WHERE game_id = ? AND player_id = ? AND normalized_word = ?
            "#,
        )
        .bind(game_id)
        .bind(player_id)
        .bind(normalized_word)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(guess_from_row).transpose()
    }

    async fn insert_guess(&self, guess: NewGuess) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO guesses (guid, game_id, player_id, word, normalized_word, valid, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(guess.guid.to_string())
        .bind(&guess.game_id)
        .bind(&guess.player_id)
        .bind(&guess.word)
        .bind(&guess.normalized_word)
        .bind(guess.valid)
        .bind(guess.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted(guess.into_guess())),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_guesses(&self, game_id: &str, player_id: &str) -> Result<Vec<Guess>> {
        let rows = sqlx::query(
            r#"
            SELECT guid, game_id, player_id, word, valid, created_at
            FROM guesses
            WHERE game_id = ? AND player_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(game_id)
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(guess_from_row).collect()
    }
}
