//! Association scoring of candidates.
//!
//! [`CooccurrenceCounts`] records, for every position in every segment, the
//! gapped token patterns starting there: a pattern spans up to
//! `max_order` tokens, fixes its first and last token and any subset of the
//! tokens between. These are the joint marginals a candidate's contingency
//! table is derived from.

use std::collections::HashMap;

use termex_config::MAX_ASSOCIATION_ORDER;

use crate::{
    candidate::CandidateTable,
    corpus::Corpus,
    measures::{AssociationMeasure, Contingency},
    tokenize::Tokenizer,
};

/// Placeholder for an unconstrained position inside a gapped pattern.
const GAP: &str = "\u{0}";

/// Gapped pattern counts over a corpus.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceCounts {
    /// Pattern key to count. Keys join tokens and gaps with spaces.
    patterns: HashMap<String, u64>,
    /// Total token count.
    total: u64,
    /// Longest pattern span counted.
    max_order: usize,
}

impl CooccurrenceCounts {
    /// Counts patterns up to `max_order` tokens (capped at 4) inside every
    /// segment.
    pub fn from_corpus(corpus: &Corpus, tokenizer: &dyn Tokenizer, max_order: usize) -> Self {
        let max_order = max_order.clamp(1, MAX_ASSOCIATION_ORDER);
        let mut counts = Self {
            max_order,
            ..Self::default()
        };

        for segment in corpus.iter() {
            let tokens = tokenizer.tokenize(&segment.text);
            counts.total += tokens.len() as u64;
            for start in 0..tokens.len() {
                let longest = max_order.min(tokens.len() - start);
                for span in 1..=longest {
                    counts.count_span(&tokens[start..start + span]);
                }
            }
        }

        log::info!(
            "counted {} gapped patterns over {} tokens",
            counts.patterns.len(),
            counts.total
        );
        counts
    }

    /// Counts every gapped pattern with fixed ends over `window`.
    fn count_span(&mut self, window: &[String]) {
        let interior = window.len().saturating_sub(2);
        for inner_mask in 0u32..(1 << interior) {
            let key = window
                .iter()
                .enumerate()
                .map(|(i, token)| {
                    let is_end = i == 0 || i == window.len() - 1;
                    if is_end || inner_mask & (1 << (i - 1)) != 0 {
                        token.as_str()
                    } else {
                        GAP
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            *self.patterns.entry(key).or_insert(0) += 1;
        }
    }

    /// Total token count.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Longest order a contingency table can be built for.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// How often the tokens at the positions set in `mask` co-occur with the
    /// same relative offsets.
    fn joint(&self, tokens: &[&str], mask: u32) -> u64 {
        if mask == 0 {
            return self.total;
        }
        let lo = mask.trailing_zeros() as usize;
        let hi = (u32::BITS - 1 - mask.leading_zeros()) as usize;
        let key = (lo..=hi)
            .map(|i| if mask & (1 << i) != 0 { tokens[i] } else { GAP })
            .collect::<Vec<_>>()
            .join(" ");
        self.patterns.get(&key).copied().unwrap_or(0)
    }

    /// Builds the contingency table of a space-separated n-gram.
    ///
    /// Returns `None` for unigrams and for orders beyond `max_order`.
    pub fn contingency(&self, text: &str) -> Option<Contingency> {
        let tokens: Vec<&str> = text.split(' ').collect();
        let order = tokens.len();
        if order < 2 || order > self.max_order {
            return None;
        }
        Some(Contingency::from_marginals(
            order,
            self.total as f64,
            |mask| self.joint(&tokens, mask) as f64,
        ))
    }

    /// Joint count of a space-separated n-gram.
    pub fn frequency(&self, text: &str) -> u64 {
        let tokens: Vec<&str> = text.split(' ').collect();
        if tokens.len() > self.max_order {
            return 0;
        }
        let full = (1u32 << tokens.len()) - 1;
        self.joint(&tokens, full)
    }
}

/// Result of [`score_candidates`].
#[derive(Debug, Clone, Default)]
pub struct ScoringReport {
    /// Rescored table.
    pub table: CandidateTable,
    /// Orders the measure could not score.
    pub skipped_orders: Vec<usize>,
}

/// Scores candidates of the given orders with an association measure.
///
/// For every scored order, each candidate of that order loses its previous
/// value and measure, then gets the new score if its n-gram occurs in the
/// corpus. Candidates of other orders are untouched. Orders the measure is not
/// defined for are skipped and reported.
pub fn score_candidates(
    table: &CandidateTable,
    counts: &CooccurrenceCounts,
    measure: AssociationMeasure,
    orders: &[usize],
) -> ScoringReport {
    let mut scored = table.clone();
    let mut skipped_orders = Vec::new();

    for &order in orders {
        if !measure.supports(order) || order > counts.max_order() {
            log::warn!("{measure} is not defined for {order}-grams; skipping");
            skipped_orders.push(order);
            continue;
        }

        let mut updated = 0usize;
        for candidate in scored.iter_mut().filter(|c| c.n == order) {
            candidate.measure = None;
            candidate.value = None;
            let Some(contingency) = counts.contingency(&candidate.text) else {
                continue;
            };
            if contingency.joint() <= 0.0 {
                log::debug!("'{}' does not occur in the corpus", candidate.text);
                continue;
            }
            candidate.measure = Some(measure.name().to_string());
            candidate.value = Some(measure.score(&contingency));
            updated += 1;
        }
        log::info!("scored {updated} {order}-gram candidates with {measure}");
    }

    ScoringReport {
        table: scored,
        skipped_orders,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{candidate::TermCandidate, tokenize::WhitespaceTokenizer};

    fn counts(lines: &[&str]) -> CooccurrenceCounts {
        CooccurrenceCounts::from_corpus(&Corpus::from_lines(lines), &WhitespaceTokenizer, 4)
    }

    #[test]
    fn counts_respect_segments() {
        let counts = counts(&["new york", "city hall"]);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.frequency("new york"), 1);
        assert_eq!(counts.frequency("york city"), 0);
    }

    #[test]
    fn gapped_patterns() {
        let counts = counts(&["a x b", "a y b", "a b"]);
        let tokens = ["a", "q", "b"];
        // a _ b occurs twice
        assert_eq!(counts.joint(&tokens, 0b101), 2);
        assert_eq!(counts.joint(&tokens, 0b001), 3);
        assert_eq!(counts.frequency("a b"), 1);
    }

    #[test]
    fn independent_pair_scores_zero() {
        let counts = counts(&["a b", "a", "b"]);
        let contingency = counts.contingency("a b").unwrap();
        assert_eq!(contingency.joint(), 1.0);
        // n_oo = n_xx - n_ix - n_xi
        assert_eq!(contingency.observed(3), 0.0);

        let pmi = AssociationMeasure::Pmi.score(&contingency);
        let ll = AssociationMeasure::LogLikelihood.score(&contingency);
        assert!(pmi.abs() < 1e-9, "pmi = {pmi}");
        assert!(ll.abs() < 1e-9, "ll = {ll}");
    }

    #[test]
    fn contingency_bounds() {
        let counts = CooccurrenceCounts::from_corpus(
            &Corpus::from_lines(["a b c"]),
            &WhitespaceTokenizer,
            2,
        );
        assert!(counts.contingency("a").is_none());
        assert!(counts.contingency("a b").is_some());
        assert!(counts.contingency("a b c").is_none());
    }

    #[test]
    fn scores_only_requested_orders() {
        let counts = counts(&["new york city", "new york", "new car", "old york"]);
        let table: CandidateTable = vec![
            TermCandidate::with_frequency("new york", 2),
            TermCandidate::with_frequency("new york city", 1),
            TermCandidate::with_frequency("york", 3),
            TermCandidate::with_frequency("missing pair", 1),
        ]
        .into();

        let report = score_candidates(&table, &counts, AssociationMeasure::Pmi, &[2]);
        assert!(report.skipped_orders.is_empty());

        let new_york = report.table.get("new york").unwrap();
        assert_eq!(new_york.measure.as_deref(), Some("pmi"));
        assert!((new_york.value.unwrap() - 1.0).abs() < 1e-9);

        let missing = report.table.get("missing pair").unwrap();
        assert_eq!(missing.measure, None);
        assert_eq!(missing.value, None);

        let trigram = report.table.get("new york city").unwrap();
        assert_eq!(trigram.measure.as_deref(), Some("freq"));
    }

    #[test]
    fn scores_quadgrams() {
        let counts = counts(&["a b c d", "a b c d", "a x y z"]);
        let table: CandidateTable = vec![TermCandidate::with_frequency("a b c d", 2)].into();

        let contingency = counts.contingency("a b c d").unwrap();
        assert_eq!(contingency.cell_count(), 16);
        assert_eq!(contingency.joint(), 2.0);
        // "a" followed by other tokens
        assert_eq!(contingency.observed(0b1110), 1.0);
        assert_eq!(contingency.observed(0b1111), 9.0);

        let report = score_candidates(&table, &counts, AssociationMeasure::Pmi, &[4]);
        let quadgram = report.table.get("a b c d").unwrap();
        assert_eq!(quadgram.measure.as_deref(), Some("pmi"));
        // log2(2 * 12^3 / (3 * 2 * 2 * 2))
        assert!((quadgram.value.unwrap() - 144f64.log2()).abs() < 1e-9);

        let report = score_candidates(&table, &counts, AssociationMeasure::LogLikelihood, &[4]);
        let value = report.table.get("a b c d").unwrap().value.unwrap();
        assert!((value - 41.291839354354565).abs() < 1e-6, "ll = {value}");
    }

    #[test]
    fn skipped_orders_are_reported() {
        let counts = counts(&["new york city"]);
        let table: CandidateTable = vec![TermCandidate::with_frequency("new york city", 1)].into();

        let report = score_candidates(&table, &counts, AssociationMeasure::Dice, &[1, 3, 5]);
        assert_eq!(report.skipped_orders, vec![1, 3, 5]);
        assert_eq!(report.table, table);

        let report = score_candidates(&table, &counts, AssociationMeasure::LogLikelihood, &[3]);
        let trigram = report.table.get("new york city").unwrap();
        assert_eq!(trigram.measure.as_deref(), Some("loglikelihood"));
    }
}
