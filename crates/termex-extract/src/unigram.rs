//! Unigram candidates derived from multi-word candidates.

use std::collections::HashMap;

use crate::candidate::{CandidateTable, TermCandidate};

/// Aggregates candidate frequencies by the token at `position`.
///
/// Non-negative positions count from the start, negative ones from the end
/// (`-1` is the last token). Candidates too short for the position are
/// skipped. The result holds unigram candidates scored by frequency.
pub fn select_unigrams(table: &CandidateTable, position: isize) -> CandidateTable {
    let mut frequencies: HashMap<&str, u64> = HashMap::new();
    for candidate in table.iter() {
        let tokens = candidate.tokens();
        let index = if position < 0 {
            tokens.len().checked_sub(position.unsigned_abs())
        } else {
            Some(position.unsigned_abs())
        };
        if let Some(&token) = index.and_then(|i| tokens.get(i)) {
            *frequencies.entry(token).or_insert(0) += candidate.frequency;
        }
    }

    let unigrams: CandidateTable = frequencies
        .into_iter()
        .map(|(token, frequency)| TermCandidate::with_frequency(token, frequency))
        .collect();
    log::info!("selected {} unigrams", unigrams.len());
    unigrams
}

#[cfg(test)]
mod test {
    use super::*;

    fn table() -> CandidateTable {
        vec![
            TermCandidate::with_frequency("big data lake", 2),
            TermCandidate::with_frequency("data lake", 5),
            TermCandidate::with_frequency("big data", 3),
            TermCandidate::with_frequency("lake", 1),
        ]
        .into()
    }

    #[test]
    fn heads_from_the_end() {
        let unigrams = select_unigrams(&table(), -1);
        assert_eq!(unigrams.get("lake").unwrap().frequency, 8);
        assert_eq!(unigrams.get("data").unwrap().frequency, 3);
        assert_eq!(unigrams.len(), 2);
        assert_eq!(unigrams.get("lake").unwrap().n, 1);
    }

    #[test]
    fn position_from_the_start() {
        let unigrams = select_unigrams(&table(), 1);
        // "big data lake" and "big data"
        assert_eq!(unigrams.get("data").unwrap().frequency, 5);
        assert_eq!(unigrams.get("lake").unwrap().frequency, 5);
        assert!(!unigrams.contains("big"));
    }

    #[test]
    fn short_candidates_are_skipped() {
        let unigrams = select_unigrams(&table(), -3);
        assert_eq!(unigrams.len(), 1);
        assert_eq!(unigrams.get("big").unwrap().frequency, 2);
    }
}
