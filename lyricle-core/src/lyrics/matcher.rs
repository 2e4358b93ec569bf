//! Guess matching
//!
//! A guess matches a word only if both normalize to the same string:
//! the first run of word characters, lowercased. Substrings never match.

use super::masker::MaskedContent;
use super::tokenizer::{Token, WORD_CLASS};
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{}+", WORD_CLASS)).expect("word class is valid"));

/// Normalized form of `text`, or `None` if it contains no word characters
pub fn normalize(text: &str) -> Option<String> {
    WORD_RUN.find(text).map(|m| m.as_str().to_lowercase())
}

/// Case-insensitive exact match between a guess and a target word
pub fn is_exact_match(guess: &str, target: &str) -> bool {
    match (normalize(guess), normalize(target)) {
        (Some(g), Some(t)) => g == t,
        _ => false,
    }
}

/// Anything that exposes its guessable words in canonical form
pub trait GuessableWords {
    fn guessable_words(&self) -> Box<dyn Iterator<Item = String> + '_>;
}

impl GuessableWords for MaskedContent {
    fn guessable_words(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.words.iter().map(|w| w.word.clone()))
    }
}

impl GuessableWords for [Token] {
    fn guessable_words(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(
            self.iter()
                .filter(|t| t.is_to_guess)
                .filter_map(|t| normalize(&t.value)),
        )
    }
}

/// Number of guessable words in `content` equal to `word` once normalized
pub fn count_hits<C: GuessableWords + ?Sized>(word: &str, content: &C) -> usize {
    match normalize(word) {
        Some(needle) => content.guessable_words().filter(|w| *w == needle).count(),
        None => 0,
    }
}

/// True if `word` matches at least one guessable word of `content`
pub fn contains_word<C: GuessableWords + ?Sized>(word: &str, content: &C) -> bool {
    count_hits(word, content) > 0
}
