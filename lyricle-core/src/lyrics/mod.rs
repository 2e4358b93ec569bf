//! Lyrics masking
//!
//! Tokenization, masked rendering and guess matching over plain text.
//! Everything in this module is pure and safe to call from any thread.

pub mod masker;
pub mod matcher;
pub mod tokenizer;

pub use masker::{create_masked_text, mask, update_masked_text, MaskedContent, Word, MASK_CHAR};
pub use matcher::{contains_word, count_hits, is_exact_match, normalize, GuessableWords};
pub use tokenizer::{is_word_char, tokenize, Token};
