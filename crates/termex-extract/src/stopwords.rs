//! Stop-word filtering for candidate extraction.
//!
//! A stop-word set combines:
//! - Words loaded from line lists
//! - Optionally, a language's stop-words from the `stop-words` crate
//! - Every ASCII punctuation character, always
//!
//! Lookups are case-insensitive.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A case-insensitive stop-word set.
///
/// All words are stored in lowercase. Every ASCII punctuation character is a
/// member from construction on.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a set holding only punctuation.
    pub fn new() -> Self {
        let words = (0u8..=127)
            .map(char::from)
            .filter(char::is_ascii_punctuation)
            .map(String::from)
            .collect();
        Self { words }
    }

    /// Creates a set from words, plus punctuation.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stopwords = Self::new();
        stopwords.extend(words);
        stopwords
    }

    /// Creates a set from a language's built-in stop-words, plus punctuation.
    ///
    /// Accepts ISO 639-1 codes. Returns `None` for unsupported languages.
    pub fn for_language(code: &str) -> Option<Self> {
        let language = match code.to_lowercase().as_str() {
            "ca" => LANGUAGE::Catalan,
            "de" => LANGUAGE::German,
            "en" => LANGUAGE::English,
            "es" => LANGUAGE::Spanish,
            "fr" => LANGUAGE::French,
            "it" => LANGUAGE::Italian,
            "nl" => LANGUAGE::Dutch,
            "pt" => LANGUAGE::Portuguese,
            _ => return None,
        };
        Some(Self::from_words(stop_words::get(language)))
    }

    /// Adds words.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    /// Checks if a token is a stop-word, ignoring case.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    /// Returns the total number of stop-words, punctuation included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty. Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Boundary and inner stop-words used by statistical extraction.
#[derive(Debug, Clone, Default)]
pub struct StopwordSets {
    /// Rejected at the first or last position of a candidate.
    pub boundary: Stopwords,
    /// Rejected at interior positions of a candidate.
    pub inner: Stopwords,
}

impl StopwordSets {
    /// Checks whether a tokenized candidate passes both sets.
    ///
    /// Boundary words are checked at the first and last token, inner words at
    /// positions strictly between them.
    pub fn admits(&self, tokens: &[&str]) -> bool {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return false;
        };
        if self.boundary.contains(first) || self.boundary.contains(last) {
            return false;
        }
        let interior = tokens.get(1..tokens.len().saturating_sub(1)).unwrap_or(&[]);
        !interior.iter().any(|t| self.inner.contains(t))
    }
}
