//! Engine settings stored in the `settings` table
//!
//! Values are stored as text. Missing or NULL rows are (re)initialized with
//! the built-in defaults.

use crate::config::{
    EngineConfig, RevealThresholds, DEFAULT_GENIUS_THRESHOLD, DEFAULT_LYRICS_COMPLETION_THRESHOLD,
    DEFAULT_SPOTIFY_THRESHOLD,
};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

pub const LYRICS_COMPLETION_THRESHOLD_KEY: &str = "lyrics_completion_threshold";
pub const REVEAL_THRESHOLD_SPOTIFY_KEY: &str = "reveal_threshold_spotify";
pub const REVEAL_THRESHOLD_GENIUS_KEY: &str = "reveal_threshold_genius";

/// Ensure every engine setting exists with a non-NULL value
pub(crate) async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    ensure_setting(
        pool,
        LYRICS_COMPLETION_THRESHOLD_KEY,
        &DEFAULT_LYRICS_COMPLETION_THRESHOLD.to_string(),
    )
    .await?;
    ensure_setting(
        pool,
        REVEAL_THRESHOLD_SPOTIFY_KEY,
        &DEFAULT_SPOTIFY_THRESHOLD.to_string(),
    )
    .await?;
    ensure_setting(
        pool,
        REVEAL_THRESHOLD_GENIUS_KEY,
        &DEFAULT_GENIUS_THRESHOLD.to_string(),
    )
    .await?;

    debug!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it is created with the default.
/// If it exists with a NULL value, it is reset to the default.
async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    // INSERT OR IGNORE: concurrent initializers may race here
    let inserted = sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(default_value)
        .execute(pool)
        .await?
        .rows_affected();

    if inserted > 0 {
        info!("Initialized setting '{}' with default value: {}", key, default_value);
        return Ok(());
    }

    let reset = sqlx::query(
        "UPDATE settings SET value = ?, updated_at = CURRENT_TIMESTAMP WHERE key = ? AND value IS NULL",
    )
    .bind(default_value)
    .bind(key)
    .execute(pool)
    .await?
    .rows_affected();

    if reset > 0 {
        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}

/// Write a setting value
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Read a setting value, `None` if missing or NULL
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value.flatten())
}

/// Load the engine configuration from the settings table
///
/// Missing or NULL values are written back with their defaults first.
pub async fn load_engine_config(pool: &SqlitePool) -> Result<EngineConfig> {
    init_default_settings(pool).await?;

    let config = EngineConfig {
        lyrics_completion_threshold: read_fraction(
            pool,
            LYRICS_COMPLETION_THRESHOLD_KEY,
            DEFAULT_LYRICS_COMPLETION_THRESHOLD,
        )
        .await?,
        reveal_thresholds: RevealThresholds {
            spotify: read_fraction(pool, REVEAL_THRESHOLD_SPOTIFY_KEY, DEFAULT_SPOTIFY_THRESHOLD)
                .await?,
            genius: read_fraction(pool, REVEAL_THRESHOLD_GENIUS_KEY, DEFAULT_GENIUS_THRESHOLD)
                .await?,
        },
    };

    config.validate()?;
    Ok(config)
}

async fn read_fraction(pool: &SqlitePool, key: &str, default: f64) -> Result<f64> {
    match get_setting(pool, key).await? {
        Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
            Error::Config(format!("Setting '{}' is not a number: {:?}", key, raw))
        }),
        None => Ok(default),
    }
}
