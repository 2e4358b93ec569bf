//! # Lyricle Core
//!
//! Lyrics masking and progress engine for the daily song-guessing game:
//! - Tokenization, masked rendering and guess matching (`lyrics`)
//! - Section progress, completion and reveal policy (`game`)
//! - Pure game-state projection from a player's guesses (`game::state`)
//! - Guess acceptance over injected collaborators (`ledger`)
//! - SQLite collaborator and settings (`db`)
//! - Configuration loading

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod game;
pub mod ledger;
pub mod lyrics;
pub mod models;
pub mod time;

pub use config::{EngineConfig, RevealThresholds};
pub use error::{Error, Result};
pub use game::{compute_game_state, GameState};
pub use ledger::GuessLedger;
pub use models::{Game, Guess, Song};
