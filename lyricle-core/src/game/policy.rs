//! Completion and reveal policy
//!
//! Pure functions of current section progress. Found-word sets only grow,
//! so every decision here is monotonic: once true, it stays true.
//!
//! Empty sections report 0% and are left out of the title/artist
//! condition; the lyrics condition needs a non-empty lyrics section.

use super::progress::SectionProgress;
use crate::config::RevealThresholds;
use serde::{Deserialize, Serialize};

/// Tolerance when comparing against fractional thresholds
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Auxiliary content unlocked by progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveals {
    pub audio_preview: bool,
    pub full_lyrics: bool,
}

/// Game is complete when enough lyrics are found, or when title and artist
/// are both at 100%
pub fn is_game_complete(
    title: &SectionProgress,
    artist: &SectionProgress,
    lyrics: &SectionProgress,
    lyrics_threshold: f64,
) -> bool {
    let lyrics_done = !lyrics.is_empty()
        && f64::from(lyrics.percent) + THRESHOLD_EPSILON >= lyrics_threshold * 100.0;

    let required: Vec<&SectionProgress> = [title, artist]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    let title_artist_done = !required.is_empty() && required.iter().all(|s| s.is_complete());

    lyrics_done || title_artist_done
}

/// Larger of combined title+artist progress and lyrics progress, in `[0, 1]`
pub fn overall_progress(
    title: &SectionProgress,
    artist: &SectionProgress,
    lyrics: &SectionProgress,
) -> f64 {
    let heading_total = title.total + artist.total;
    let heading = if heading_total == 0 {
        0.0
    } else {
        (title.found + artist.found) as f64 / heading_total as f64
    };

    heading.max(lyrics.fraction())
}

/// Reveal gates for the current progress
pub fn reveals(
    title: &SectionProgress,
    artist: &SectionProgress,
    lyrics: &SectionProgress,
    thresholds: &RevealThresholds,
) -> Reveals {
    let overall = overall_progress(title, artist, lyrics) + THRESHOLD_EPSILON;
    Reveals {
        audio_preview: overall >= thresholds.spotify,
        full_lyrics: overall >= thresholds.genius,
    }
}
