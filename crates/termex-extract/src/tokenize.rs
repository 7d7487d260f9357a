//! Pluggable tokenization.
//!
//! Segments are split into tokens by a [`Tokenizer`]. Callers pick one per
//! language through a [`Tokenizers`] registry, which falls back to
//! whitespace splitting for languages without a registered tokenizer.

use std::collections::HashMap;

/// Splits segment text into tokens and joins them back.
pub trait Tokenizer {
    /// Splits text into tokens. Tokens never contain spaces.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Joins tokens back into text.
    fn detokenize(&self, tokens: &[String]) -> String {
        tokens.join(" ")
    }
}

/// Splits on Unicode whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Fallback used for languages without a registered tokenizer.
static WHITESPACE: WhitespaceTokenizer = WhitespaceTokenizer;

/// Language code to tokenizer registry.
#[derive(Default)]
pub struct Tokenizers {
    /// Registered tokenizers keyed by lower-cased language code.
    by_language: HashMap<String, Box<dyn Tokenizer>>,
}

impl Tokenizers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tokenizer for a language, replacing any previous one.
    pub fn register(&mut self, language: &str, tokenizer: Box<dyn Tokenizer>) {
        self.by_language
            .insert(language.to_lowercase(), tokenizer);
    }

    /// Returns the tokenizer for a language, or whitespace splitting.
    pub fn get(&self, language: &str) -> &dyn Tokenizer {
        match self.by_language.get(&language.to_lowercase()) {
            Some(tokenizer) => tokenizer.as_ref(),
            None => &WHITESPACE,
        }
    }

    /// Returns true if a tokenizer is registered for the language.
    pub fn contains(&self, language: &str) -> bool {
        self.by_language.contains_key(&language.to_lowercase())
    }
}
