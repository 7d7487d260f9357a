//! Statistical candidate extraction.
//!
//! Turns the n-gram table into candidates by stop-word filtering, and prunes
//! candidates by exclusion regexps or known term lists.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use termex_config::NgramSettings;

use crate::{
    ExtractError,
    candidate::{CandidateTable, TermCandidate},
    corpus::Segment,
    ngram::NgramTable,
    stopwords::StopwordSets,
    tokenize::Tokenizer,
};

/// Builds candidates from n-grams that pass the stop-word filter.
///
/// N-grams are visited by descending frequency and the scan stops at the first
/// one below `min_frequency`. Candidates are scored by frequency.
pub fn statistical_extraction(
    ngrams: &NgramTable,
    stopwords: &StopwordSets,
    min_frequency: u64,
) -> CandidateTable {
    let mut table = CandidateTable::new();
    let mut rejected = 0usize;

    for record in ngrams.iter() {
        if record.frequency < min_frequency {
            break;
        }
        let tokens: Vec<&str> = record.text.split(' ').collect();
        if stopwords.admits(&tokens) {
            table.insert(TermCandidate::with_frequency(
                record.text.clone(),
                record.frequency,
            ));
        } else {
            rejected += 1;
        }
    }

    log::info!(
        "statistical extraction kept {} candidates, rejected {rejected}",
        table.len()
    );
    table
}

/// Ranks the n-grams of a single segment by their local frequency.
///
/// Applies the same stop-word rules as [`statistical_extraction`]. Results are
/// ordered by descending local frequency, ties by text.
pub fn extract_from_segment(
    segment: &Segment,
    tokenizer: &dyn Tokenizer,
    stopwords: &StopwordSets,
    settings: &NgramSettings,
) -> Vec<(String, u64)> {
    let tokens = tokenizer.tokenize(&segment.text);
    let mut local: HashMap<String, u64> = HashMap::new();

    for n in settings.n_min.max(1)..=settings.n_max {
        for window in tokens.windows(n) {
            let refs: Vec<&str> = window.iter().map(String::as_str).collect();
            if stopwords.admits(&refs) {
                *local.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, u64)> = local
        .into_iter()
        .filter(|(_, frequency)| *frequency >= settings.min_frequency)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// An exclusion regexp with its token count.
#[derive(Debug, Clone)]
pub struct ExclusionRegex {
    /// Source text as loaded.
    source: String,
    /// Regex anchored at the start of the candidate.
    regex: Regex,
    /// Space-separated token count of the source text.
    token_count: usize,
}

impl ExclusionRegex {
    /// Compiles an exclusion regexp.
    ///
    /// The token count is taken from the source text split on spaces, not from
    /// the regex structure.
    pub fn new(source: &str) -> Result<Self, ExtractError> {
        let regex = Regex::new(&format!("^(?:{source})")).map_err(|source_err| {
            ExtractError::InvalidExclusionRegex {
                pattern: source.to_string(),
                source: source_err,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
            token_count: source.split(' ').count(),
        })
    }

    /// Source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Token count used to gate matches.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Returns true if the regexp excludes the candidate.
    pub fn excludes(&self, candidate: &TermCandidate) -> bool {
        candidate.n == self.token_count && self.regex.is_match(&candidate.text)
    }
}

/// Removes candidates matched by any exclusion regexp.
///
/// Returns the pruned table and the number of removed candidates.
pub fn regexp_exclusion(
    table: &CandidateTable,
    regexps: &[ExclusionRegex],
) -> (CandidateTable, usize) {
    let kept: CandidateTable = table
        .iter()
        .filter(|candidate| {
            let excluded = regexps.iter().find(|r| r.excludes(candidate));
            if let Some(regex) = excluded {
                log::debug!("excluded '{}' by /{}/", candidate.text, regex.source());
            }
            excluded.is_none()
        })
        .cloned()
        .collect();
    let removed = table.len() - kept.len();
    log::info!("regexp exclusion removed {removed} candidates");
    (kept, removed)
}

/// Removes candidates that appear in a term list.
pub fn exclude_terms(table: &CandidateTable, terms: &HashSet<String>) -> CandidateTable {
    table
        .iter()
        .filter(|candidate| !terms.contains(&candidate.text))
        .cloned()
        .collect()
}
