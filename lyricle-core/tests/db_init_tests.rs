//! Database initialization and the settings table

use lyricle_core::db::init::init_database;
use lyricle_core::db::settings::{
    LYRICS_COMPLETION_THRESHOLD_KEY, REVEAL_THRESHOLD_GENIUS_KEY, REVEAL_THRESHOLD_SPOTIFY_KEY,
};
use lyricle_core::db::{get_setting, init_memory_database, load_engine_config, set_setting};
use lyricle_core::{EngineConfig, Error};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("lyricle.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("lyricle.db");

    let pool1 = init_database(&db_path).await.unwrap();
    set_setting(&pool1, LYRICS_COMPLETION_THRESHOLD_KEY, "0.6").await.unwrap();
    pool1.close().await;

    // Re-opening keeps existing values
    let pool2 = init_database(&db_path).await.unwrap();
    let value = get_setting(&pool2, LYRICS_COMPLETION_THRESHOLD_KEY).await.unwrap();
    assert_eq!(value.as_deref(), Some("0.6"));
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let pool = init_memory_database().await.unwrap();

    assert_eq!(
        get_setting(&pool, LYRICS_COMPLETION_THRESHOLD_KEY).await.unwrap().as_deref(),
        Some("0.8")
    );
    assert_eq!(
        get_setting(&pool, REVEAL_THRESHOLD_SPOTIFY_KEY).await.unwrap().as_deref(),
        Some("0.5")
    );
    assert_eq!(
        get_setting(&pool, REVEAL_THRESHOLD_GENIUS_KEY).await.unwrap().as_deref(),
        Some("0.75")
    );

    let config = load_engine_config(&pool).await.unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[tokio::test]
async fn test_null_setting_reset_to_default() {
    let pool = init_memory_database().await.unwrap();
    sqlx::query("UPDATE settings SET value = NULL WHERE key = ?")
        .bind(REVEAL_THRESHOLD_GENIUS_KEY)
        .execute(&pool)
        .await
        .unwrap();

    let config = load_engine_config(&pool).await.unwrap();
    assert_eq!(config.reveal_thresholds.genius, 0.75);
    assert_eq!(
        get_setting(&pool, REVEAL_THRESHOLD_GENIUS_KEY).await.unwrap().as_deref(),
        Some("0.75")
    );
}

#[tokio::test]
async fn test_custom_settings_loaded() {
    let pool = init_memory_database().await.unwrap();
    set_setting(&pool, LYRICS_COMPLETION_THRESHOLD_KEY, "0.9").await.unwrap();
    set_setting(&pool, REVEAL_THRESHOLD_SPOTIFY_KEY, " 0.25 ").await.unwrap();

    let config = load_engine_config(&pool).await.unwrap();
    assert_eq!(config.lyrics_completion_threshold, 0.9);
    assert_eq!(config.reveal_thresholds.spotify, 0.25);
    assert_eq!(config.reveal_thresholds.genius, 0.75);
}

#[tokio::test]
async fn test_bad_settings_are_config_errors() {
    let pool = init_memory_database().await.unwrap();

    set_setting(&pool, REVEAL_THRESHOLD_SPOTIFY_KEY, "half").await.unwrap();
    let err = load_engine_config(&pool).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)), "unexpected {:?}", err);

    set_setting(&pool, REVEAL_THRESHOLD_SPOTIFY_KEY, "50").await.unwrap();
    let err = load_engine_config(&pool).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)), "unexpected {:?}", err);

    // Above the default genius threshold of 0.75
    set_setting(&pool, REVEAL_THRESHOLD_SPOTIFY_KEY, "0.9").await.unwrap();
    let err = load_engine_config(&pool).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)), "unexpected {:?}", err);
}
