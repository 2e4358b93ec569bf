//! Masked text rendering
//!
//! A masked rendering replaces every word character of a hidden word with
//! `_` and copies everything else verbatim, so the layout (punctuation,
//! whitespace, line breaks) of the original is preserved and the output
//! has exactly as many code points as the input.

use super::matcher::normalize;
use super::tokenizer::{is_word_char, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Replacement for a hidden word character
pub const MASK_CHAR: char = '_';

/// A guessable word located in a source text
///
/// Indices are code-point offsets, both inclusive: `start_index..=end_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Lowercased canonical form
    pub word: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// Source text together with its fully masked rendering and word positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedContent {
    pub original: String,
    pub masked_text: String,
    /// Sorted by `start_index`
    pub words: Vec<Word>,
}

impl MaskedContent {
    /// Content with no text and no words (e.g. missing lyrics)
    pub fn empty() -> Self {
        Self {
            original: String::new(),
            masked_text: String::new(),
            words: Vec::new(),
        }
    }

    /// True if the section has no guessable words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Distinct canonical words of this section
    pub fn distinct_words(&self) -> HashSet<&str> {
        self.words.iter().map(|w| w.word.as_str()).collect()
    }
}

/// Mask every word character inside the given word spans
///
/// Spans are inclusive and applied in descending `start_index` order. Spans
/// reaching past the end of the text are clamped; inverted spans are skipped. Masking an already-masked span is a
/// no-op, since `_` is not a word character.
pub fn mask(text: &str, words: &[Word]) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut ordered: Vec<&Word> = words.iter().collect();
    ordered.sort_by(|a, b| b.start_index.cmp(&a.start_index));

    for word in ordered {
        if len == 0 || word.start_index >= len || word.start_index > word.end_index {
            continue;
        }
        let end = word.end_index.min(len - 1);
        for c in &mut chars[word.start_index..=end] {
            if is_word_char(*c) {
                *c = MASK_CHAR;
            }
        }
    }

    chars.into_iter().collect()
}

/// Tokenize `text`, locate its guessable words and mask all of them
pub fn create_masked_text(text: &str) -> MaskedContent {
    let mut words = Vec::new();
    let mut offset = 0;

    for token in tokenize(text) {
        let len = token.char_len();
        if token.is_to_guess {
            words.push(Word {
                word: token.canonical(),
                start_index: offset,
                end_index: offset + len - 1,
            });
        }
        offset += len;
    }

    MaskedContent {
        original: text.to_string(),
        masked_text: mask(text, &words),
        words,
    }
}

/// Render `content` with only the words in `revealed_words` visible
///
/// Always computed from `content.original`, so calling it repeatedly with a
/// growing reveal set gives the same result as computing from scratch.
/// Revealed words are compared by normalized form.
pub fn update_masked_text<S: AsRef<str>>(content: &MaskedContent, revealed_words: &[S]) -> String {
    let revealed: HashSet<String> = revealed_words
        .iter()
        .filter_map(|w| normalize(w.as_ref()))
        .collect();

    let hidden: Vec<Word> = content
        .words
        .iter()
        .filter(|w| !revealed.contains(&w.word))
        .cloned()
        .collect();

    mask(&content.original, &hidden)
}
