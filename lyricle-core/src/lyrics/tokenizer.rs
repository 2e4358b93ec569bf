//! Text tokenizer
//!
//! Splits text into maximal runs of one character class: word characters
//! (Unicode letters, combining marks and numbers), whitespace, or anything
//! else (punctuation and symbols). Only word runs are guessable.
//!
//! Concatenating the values of all tokens always reconstructs the input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Character class of a guessable word
pub(crate) const WORD_CLASS: &str = r"[\p{L}\p{M}\p{N}]";

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+|\s+|[^\p{L}\p{M}\p{N}\s]+").expect("token pattern is valid")
});

static WORD_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{}$", WORD_CLASS)).expect("word class is valid"));

/// A run of same-class characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    /// True for word runs; punctuation and whitespace are never guessable
    pub is_to_guess: bool,
}

impl Token {
    /// Canonical word identity (lowercase form of the run)
    pub fn canonical(&self) -> String {
        self.value.to_lowercase()
    }

    /// Length of the token in code points
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// Split `text` into tokens. Total and deterministic; empty input yields
/// an empty vector.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| {
            let value = m.as_str();
            Token {
                value: value.to_string(),
                is_to_guess: value.chars().next().is_some_and(is_word_char),
            }
        })
        .collect()
}

/// True if `c` belongs to a guessable word (letter, mark or number)
pub fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_simple_sentence() {
        let tokens = tokenize("Hello World");
        assert_eq!(values(&tokens), vec!["Hello", " ", "World"]);
        assert!(tokens[0].is_to_guess);
        assert!(!tokens[1].is_to_guess);
        assert!(tokens[2].is_to_guess);
    }

    #[test]
    fn test_contraction_splits_on_apostrophe() {
        let tokens = tokenize("it's");
        assert_eq!(values(&tokens), vec!["it", "'", "s"]);
        assert_eq!(
            tokens.iter().map(|t| t.is_to_guess).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_punctuation_runs_are_grouped() {
        let tokens = tokenize("Wait...  what?!");
        assert_eq!(values(&tokens), vec!["Wait", "...", "  ", "what", "?!"]);
    }

    #[test]
    fn test_digits_are_words() {
        let tokens = tokenize("99 Luftballons");
        assert_eq!(values(&tokens), vec!["99", " ", "Luftballons"]);
        assert!(tokens[0].is_to_guess);
    }

    #[test]
    fn test_unicode_letters_and_marks() {
        // Precomposed and decomposed accents stay inside one word
        let tokens = tokenize("Café cafe\u{0301} Straße");
        assert_eq!(values(&tokens), vec!["Café", " ", "cafe\u{0301}", " ", "Straße"]);
        assert!(tokens.iter().filter(|t| t.is_to_guess).count() == 3);
    }

    #[test]
    fn test_non_latin_scripts() {
        let tokens = tokenize("Любовь, 愛!");
        assert_eq!(values(&tokens), vec!["Любовь", ",", " ", "愛", "!"]);
        assert_eq!(tokens[0].canonical(), "любовь");
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let inputs = [
            "",
            "Hello, World! What's up?",
            "  leading and trailing  ",
            "line one\nline two\r\n\tTabbed",
            "émoji 🎵 notes ♪♫ and_underscores",
            "¿Dónde están?",
        ];
        for input in inputs {
            let joined: String = tokenize(input).into_iter().map(|t| t.value).collect();
            assert_eq!(joined, input);
        }
    }

    #[test]
    fn test_underscore_is_not_a_word_char() {
        assert!(!is_word_char('_'));
        assert!(!is_word_char('\''));
        assert!(!is_word_char('-'));
        assert!(is_word_char('a'));
        assert!(is_word_char('7'));
        assert!(is_word_char('\u{0301}'));
    }

    #[test]
    fn test_char_len_counts_code_points() {
        let token = &tokenize("naïve")[0];
        assert_eq!(token.char_len(), 5);
    }
}
