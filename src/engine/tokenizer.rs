//! Shared tokenizer for vector-space indexing and query normalization.
//!
//! The exact same pipeline runs over catalog descriptions at index-build
//! time and over queries at search time; any divergence between the two
//! would make similarity scores meaningless.

use std::collections::{HashMap, HashSet};

use rust_stemmers::{Algorithm, Stemmer};

/// Stop words to exclude from tokenization.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can",
    "need", "must", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
    "about", "but", "not", "or", "and", "if", "it", "its", "this", "that", "which", "who", "what",
    "when", "where", "how", "all", "each", "both", "few", "more", "most", "other", "some", "such",
    "no", "than", "too", "very", "just", "also",
];

/// Deterministic tokenizer: lowercases, splits on non-alphanumeric
/// boundaries, drops short tokens and stop words, then reduces each
/// surviving token to its stem so inflectional variants collapse to one
/// surface form ("grilled" and "grilling" both index as "grill").
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl Tokenizer {
    /// Create a new tokenizer with the default stop word list and the
    /// English Snowball stemmer.
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Tokenize text into stemmed lowercase terms. Empty input yields an
    /// empty vector, never an error.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.len() >= 2)
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            // A token can stem into a stop word ("doing" -> "do"); the
            // second pass keeps normalization idempotent.
            .filter(|stem| stem.len() >= 2 && !self.stop_words.contains(stem.as_str()))
            .collect()
    }

    /// Tokenize and return term frequencies.
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, u32> {
        let mut freqs = HashMap::new();
        for token in self.tokenize(text) {
            *freqs.entry(token).or_insert(0) += 1;
        }
        freqs
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
