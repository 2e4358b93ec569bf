//! Progress calculation
//!
//! Progress counts distinct words by normalized form: a word that occurs
//! ten times in the lyrics counts once toward `total`, and is found as soon
//! as it is guessed once.

use super::policy::is_game_complete;
use crate::config::EngineConfig;
use crate::lyrics::{create_masked_text, MaskedContent};
use crate::models::Song;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Found/total distinct words of one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub found: usize,
    pub total: usize,
    /// `round(found / total * 100)`; 0 for an empty section
    pub percent: u32,
}

impl SectionProgress {
    /// Section has no guessable words (e.g. instrumental lyrics)
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// A non-empty section at 100%
    ///
    /// Judged on the rounded `percent`, the same figure players see, so a
    /// section at 199/200 already counts as complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.percent >= 100
    }

    /// `found / total`, 0.0 for an empty section
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.found as f64 / self.total as f64
        }
    }
}

/// Progress of each section plus the completion verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub title: SectionProgress,
    pub artist: SectionProgress,
    pub lyrics: SectionProgress,
    pub is_game_complete: bool,
}

/// Masked forms of the three sections of a song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSong {
    pub title: MaskedContent,
    pub artist: MaskedContent,
    pub lyrics: MaskedContent,
}

impl MaskedSong {
    /// Mask all sections; missing lyrics become an empty section
    pub fn from_song(song: &Song) -> Self {
        Self {
            title: create_masked_text(&song.title),
            artist: create_masked_text(&song.artist),
            lyrics: song
                .lyrics
                .as_deref()
                .map(create_masked_text)
                .unwrap_or_else(MaskedContent::empty),
        }
    }

    /// All three sections, title first
    pub fn sections(&self) -> [&MaskedContent; 3] {
        [&self.title, &self.artist, &self.lyrics]
    }
}

/// Progress of one section against the set of found (normalized) words
pub fn calculate_section_progress(
    found_words: &BTreeSet<String>,
    content: &MaskedContent,
) -> SectionProgress {
    let distinct = content.distinct_words();
    let total = distinct.len();
    let found = distinct
        .iter()
        .filter(|w| found_words.contains(**w))
        .count();

    let percent = if total == 0 {
        0
    } else {
        ((found as f64 / total as f64) * 100.0).round() as u32
    };

    SectionProgress {
        found,
        total,
        percent,
    }
}

/// Progress of all sections and whether the game is complete
pub fn calculate_game_progress(
    found_words: &BTreeSet<String>,
    song: &MaskedSong,
    config: &EngineConfig,
) -> GameProgress {
    let title = calculate_section_progress(found_words, &song.title);
    let artist = calculate_section_progress(found_words, &song.artist);
    let lyrics = calculate_section_progress(found_words, &song.lyrics);

    GameProgress {
        title,
        artist,
        lyrics,
        is_game_complete: is_game_complete(
            &title,
            &artist,
            &lyrics,
            config.lyrics_completion_threshold,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_distinct_word_counting() {
        let content = create_masked_text("la la la land");
        let progress = calculate_section_progress(&found(&["la"]), &content);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.found, 1);
        assert_eq!(progress.percent, 50);
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        let content = create_masked_text("one two three");
        assert_eq!(calculate_section_progress(&found(&["one"]), &content).percent, 33);
        assert_eq!(
            calculate_section_progress(&found(&["one", "two"]), &content).percent,
            67
        );
    }

    #[test]
    fn test_empty_section() {
        let progress = calculate_section_progress(&found(&["hello"]), &MaskedContent::empty());
        assert_eq!(
            progress,
            SectionProgress {
                found: 0,
                total: 0,
                percent: 0
            }
        );
        assert!(progress.is_empty());
        assert!(!progress.is_complete());
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn test_found_words_outside_section_ignored() {
        let content = create_masked_text("Yellow Submarine");
        let progress = calculate_section_progress(&found(&["yellow", "beatles"]), &content);
        assert_eq!(progress.found, 1);
        assert_eq!(progress.total, 2);
    }

    #[test]
    fn test_masked_song_instrumental() {
        let song = Song::new("Flight", "Someone", None::<String>);
        let masked = MaskedSong::from_song(&song);
        assert!(masked.lyrics.is_empty());
        assert_eq!(masked.sections().len(), 3);
    }

    #[test]
    fn test_game_progress_composes_sections() {
        let song = Song::new("Hey Jude", "The Beatles", Some("Hey Jude, don't make it bad"));
        let masked = MaskedSong::from_song(&song);
        let progress = calculate_game_progress(
            &found(&["hey", "jude", "the", "beatles"]),
            &masked,
            &EngineConfig::default(),
        );
        assert_eq!(progress.title.percent, 100);
        assert_eq!(progress.artist.percent, 100);
        // hey, jude, don, t, make, it, bad
        assert_eq!(progress.lyrics.total, 7);
        assert_eq!(progress.lyrics.found, 2);
        assert!(progress.is_game_complete);
    }
}
