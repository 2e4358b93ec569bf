//! Engine configuration
//!
//! Thresholds are fractions in `[0, 1]`. Configuration comes from, in
//! priority order:
//! 1. Explicit path (command-line argument of the embedding application)
//! 2. Environment variable (`LYRICLE_CONFIG`)
//! 3. `<config dir>/lyricle/config.toml`
//! 4. Built-in defaults
//!
//! A missing config file is not an error: a warning is logged and the
//! defaults are used. The `settings` table (see [`crate::db`]) is the
//! alternative runtime source.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "LYRICLE_CONFIG";

/// Default lyrics fraction that completes a game
pub const DEFAULT_LYRICS_COMPLETION_THRESHOLD: f64 = 0.80;

/// Default overall progress that unlocks the audio preview
pub const DEFAULT_SPOTIFY_THRESHOLD: f64 = 0.50;

/// Default overall progress that unlocks the full lyrics
pub const DEFAULT_GENIUS_THRESHOLD: f64 = 0.75;

/// Progress thresholds for auxiliary reveals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealThresholds {
    /// Audio preview
    #[serde(default = "default_spotify")]
    pub spotify: f64,

    /// Full lyrics
    #[serde(default = "default_genius")]
    pub genius: f64,
}

impl Default for RevealThresholds {
    fn default() -> Self {
        Self {
            spotify: DEFAULT_SPOTIFY_THRESHOLD,
            genius: DEFAULT_GENIUS_THRESHOLD,
        }
    }
}

/// Configuration consumed by the completion and reveal policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_lyrics_threshold")]
    pub lyrics_completion_threshold: f64,

    #[serde(default)]
    pub reveal_thresholds: RevealThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lyrics_completion_threshold: DEFAULT_LYRICS_COMPLETION_THRESHOLD,
            reveal_thresholds: RevealThresholds::default(),
        }
    }
}

fn default_lyrics_threshold() -> f64 {
    DEFAULT_LYRICS_COMPLETION_THRESHOLD
}

fn default_spotify() -> f64 {
    DEFAULT_SPOTIFY_THRESHOLD
}

fn default_genius() -> f64 {
    DEFAULT_GENIUS_THRESHOLD
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every threshold is a finite fraction in `[0, 1]` and the full
    /// lyrics never unlock before the audio preview
    pub fn validate(&self) -> Result<()> {
        check_fraction("lyrics_completion_threshold", self.lyrics_completion_threshold)?;
        check_fraction("reveal_thresholds.spotify", self.reveal_thresholds.spotify)?;
        check_fraction("reveal_thresholds.genius", self.reveal_thresholds.genius)?;

        if self.reveal_thresholds.spotify > self.reveal_thresholds.genius {
            return Err(Error::Config(format!(
                "reveal_thresholds.spotify ({}) must not exceed reveal_thresholds.genius ({})",
                self.reveal_thresholds.spotify, self.reveal_thresholds.genius
            )));
        }
        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}

/// Resolve the config file path
///
/// Priority: explicit argument, then the named environment variable, then
/// the platform config directory. Returns `None` only if no platform config
/// directory exists.
pub fn resolve_config_path(cli_arg: Option<&str>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// `<config dir>/lyricle/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyricle").join("config.toml"))
}

/// Load configuration from `path`
///
/// A missing file (or `None`) yields the defaults with a warning. An
/// unreadable, malformed or out-of-range file is an error.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        warn!("No config path available, using default engine config");
        return Ok(EngineConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file not found: {}, using default engine config",
            path.display()
        );
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;
    info!("Loaded engine config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.lyrics_completion_threshold, 0.80);
        assert_eq!(config.reveal_thresholds.spotify, 0.50);
        assert_eq!(config.reveal_thresholds.genius, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            lyrics_completion_threshold = 0.9

            [reveal_thresholds]
            genius = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(config.lyrics_completion_threshold, 0.9);
        assert_eq!(config.reveal_thresholds.spotify, 0.50);
        assert_eq!(config.reveal_thresholds.genius, 0.6);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = EngineConfig::from_toml_str("lyrics_completion_threshold = 80").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = EngineConfig::from_toml_str("[reveal_thresholds]\nspotify = -0.1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_inverted_reveal_thresholds_rejected() {
        let err = EngineConfig::from_toml_str("[reveal_thresholds]\nspotify = 0.9\ngenius = 0.6")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)), "unexpected {:?}", err);

        // Equal thresholds unlock both at once
        let config = EngineConfig::from_toml_str("[reveal_thresholds]\nspotify = 0.7\ngenius = 0.7")
            .unwrap();
        assert_eq!(config.reveal_thresholds.spotify, config.reveal_thresholds.genius);
    }

    #[test]
    fn test_nan_rejected() {
        let config = EngineConfig {
            lyrics_completion_threshold: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = EngineConfig::from_toml_str("lyrics_completion_threshold = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_arg_takes_priority() {
        let path = resolve_config_path(Some("/tmp/explicit.toml"), "LYRICLE_TEST_UNSET_VAR");
        assert_eq!(path, Some(PathBuf::from("/tmp/explicit.toml")));
    }
}
