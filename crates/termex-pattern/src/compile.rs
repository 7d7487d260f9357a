//! Pattern compilation to regular expressions.
//!
//! Each token spec becomes `field\|field\|field`, tokens are joined by a space
//! and the whole expression is wrapped in one outer group. Matching is
//! anchored: a pattern must consume the complete tagged n-gram.

use std::collections::HashSet;

use regex::Regex;

use crate::{
    ast::{FieldSpec, LinguisticPattern, TokenSpec},
    error::PatternError,
    parser::parse,
};

/// Regex for a capturing field with no literal constraint.
const CAPTURE_ANY: &str = r"([^\s]+?)";
/// Regex for a non-capturing wildcard field.
const WILDCARD: &str = r"[^\s]+?";
/// Regex that replaces `.*` inside literals so matches never cross tokens.
const NON_SPACE_RUN: &str = r"[^\s]+";
/// Escaped field separator.
const FIELD_JOIN: &str = r"\|";

impl LinguisticPattern {
    /// Translates the pattern into its unanchored regex source.
    pub fn to_regex_source(&self) -> String {
        let tokens: Vec<String> = self.tokens.iter().map(translate_token).collect();
        format!("({})", tokens.join(" "))
    }

    /// Compiles the pattern into an anchored matcher.
    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        let source = self.to_regex_source();
        let regex = Regex::new(&format!("^{source}$")).map_err(|e| PatternError::InvalidRegex {
            pattern: self.to_string(),
            source: e,
        })?;
        Ok(CompiledPattern {
            pattern: self.clone(),
            source,
            regex,
        })
    }
}

/// Translates one token spec.
fn translate_token(token: &TokenSpec) -> String {
    let fields: Vec<String> = token.fields.iter().map(translate_field).collect();
    fields.join(FIELD_JOIN)
}

/// Translates one field spec.
fn translate_field(field: &FieldSpec) -> String {
    match field {
        FieldSpec::Capture => CAPTURE_ANY.to_string(),
        FieldSpec::Wildcard => WILDCARD.to_string(),
        FieldSpec::CaptureLiteral(text) => format!("({})", expand_wildcards(text)),
        FieldSpec::Literal(text) => expand_wildcards(text),
    }
}

/// Restricts `.*` in literal fragments to a single token.
fn expand_wildcards(text: &str) -> String {
    text.replace(".*", NON_SPACE_RUN)
}

/// A pattern compiled to an anchored regular expression.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The parsed pattern.
    pattern: LinguisticPattern,
    /// Unanchored regex source, also used as the identity of the pattern.
    source: String,
    /// Anchored matcher.
    regex: Regex,
}

impl CompiledPattern {
    /// Parses and compiles pattern source text.
    pub fn from_source(source: &str) -> Result<Self, PatternError> {
        parse(source)?.compile()
    }

    /// Returns the parsed pattern.
    pub fn pattern(&self) -> &LinguisticPattern {
        &self.pattern
    }

    /// Returns the unanchored regex source.
    pub fn regex_source(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches the whole tagged n-gram.
    pub fn is_match(&self, tagged_ngram: &str) -> bool {
        self.regex.is_match(tagged_ngram)
    }

    /// Extracts a candidate from a tagged n-gram.
    ///
    /// The match must span the whole n-gram. The candidate is every captured
    /// group after the outer wrapper, joined by single spaces. Groups that did
    /// not participate in the match are skipped.
    pub fn extract(&self, tagged_ngram: &str) -> Option<String> {
        let caps = self.regex.captures(tagged_ngram)?;
        let whole = caps.get(0)?;
        if whole.as_str() != tagged_ngram {
            return None;
        }
        let parts: Vec<&str> = caps.iter().skip(2).flatten().map(|m| m.as_str()).collect();
        Some(parts.join(" "))
    }
}

/// An ordered, de-duplicated set of compiled patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    /// Patterns in load order.
    patterns: Vec<CompiledPattern>,
    /// Regex sources already present.
    seen: HashSet<String>,
}

impl PatternSet {
    /// Creates an empty pattern set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every non-blank line into the set.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            set.insert(CompiledPattern::from_source(line)?);
        }
        Ok(set)
    }

    /// Adds a pattern. Returns false if an identical pattern was already present.
    pub fn insert(&mut self, pattern: CompiledPattern) -> bool {
        if !self.seen.insert(pattern.source.clone()) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    /// Returns the first candidate extracted by any pattern, in load order.
    pub fn extract(&self, tagged_ngram: &str) -> Option<String> {
        self.patterns.iter().find_map(|p| p.extract(tagged_ngram))
    }

    /// Iterates the patterns in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
