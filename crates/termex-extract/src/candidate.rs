//! Term candidates.
//!
//! The candidate table carries pipeline state between stages. Each stage
//! reads a table and returns a new one; callers swap it in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measure label for plain frequency values.
pub const MEASURE_FREQ: &str = "freq";

/// A candidate term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCandidate {
    /// Candidate text, tokens joined by spaces.
    pub text: String,
    /// Token count.
    pub n: usize,
    /// Corpus frequency.
    pub frequency: u64,
    /// Name of the measure that produced `value`.
    pub measure: Option<String>,
    /// Score under `measure`.
    pub value: Option<f64>,
}

impl TermCandidate {
    /// Creates a candidate scored by its own frequency.
    pub fn with_frequency(text: impl Into<String>, frequency: u64) -> Self {
        let text = text.into();
        let n = text.split(' ').count();
        Self {
            text,
            n,
            frequency,
            measure: Some(MEASURE_FREQ.to_string()),
            value: Some(frequency as f64),
        }
    }

    /// Tokens of the candidate.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split(' ').collect()
    }
}

/// Candidates keyed uniquely by text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TermCandidate>", into = "Vec<TermCandidate>")]
pub struct CandidateTable {
    /// Text to candidate.
    candidates: BTreeMap<String, TermCandidate>,
}

impl CandidateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a candidate, replacing any candidate with the same text.
    pub fn insert(&mut self, candidate: TermCandidate) -> Option<TermCandidate> {
        self.candidates.insert(candidate.text.clone(), candidate)
    }

    /// Adds frequency to an existing candidate, or inserts a new one.
    ///
    /// The merged candidate is scored by its summed frequency.
    pub fn add_frequency(&mut self, text: &str, frequency: u64) {
        match self.candidates.get_mut(text) {
            Some(existing) => {
                existing.frequency += frequency;
                existing.measure = Some(MEASURE_FREQ.to_string());
                existing.value = Some(existing.frequency as f64);
            }
            None => {
                self.insert(TermCandidate::with_frequency(text, frequency));
            }
        }
    }

    /// Looks up a candidate by text.
    pub fn get(&self, text: &str) -> Option<&TermCandidate> {
        self.candidates.get(text)
    }

    /// Looks up a candidate for modification.
    pub fn get_mut(&mut self, text: &str) -> Option<&mut TermCandidate> {
        self.candidates.get_mut(text)
    }

    /// Removes a candidate by text.
    pub fn remove(&mut self, text: &str) -> Option<TermCandidate> {
        self.candidates.remove(text)
    }

    /// Returns true if a candidate with this text exists.
    pub fn contains(&self, text: &str) -> bool {
        self.candidates.contains_key(text)
    }

    /// Iterates candidates in text order.
    pub fn iter(&self) -> impl Iterator<Item = &TermCandidate> {
        self.candidates.values()
    }

    /// Iterates candidates mutably in text order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TermCandidate> {
        self.candidates.values_mut()
    }

    /// Candidates by descending frequency, ties by text.
    pub fn by_frequency(&self) -> Vec<&TermCandidate> {
        let mut sorted: Vec<&TermCandidate> = self.candidates.values().collect();
        sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.text.cmp(&b.text)));
        sorted
    }

    /// Sum of all candidate frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.candidates.values().map(|c| c.frequency).sum()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl FromIterator<TermCandidate> for CandidateTable {
    fn from_iter<I: IntoIterator<Item = TermCandidate>>(iter: I) -> Self {
        let mut table = Self::new();
        for candidate in iter {
            table.insert(candidate);
        }
        table
    }
}

impl From<Vec<TermCandidate>> for CandidateTable {
    fn from(candidates: Vec<TermCandidate>) -> Self {
        candidates.into_iter().collect()
    }
}

impl From<CandidateTable> for Vec<TermCandidate> {
    fn from(table: CandidateTable) -> Self {
        table.candidates.into_values().collect()
    }
}
