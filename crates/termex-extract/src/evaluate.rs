//! Precision and recall of a ranked candidate list against gold terms.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    candidate::CandidateTable,
    rank::{RankOptions, SortOrder, rank_candidates},
};

/// Evaluation parameters.
#[derive(Debug, Clone)]
pub struct EvaluationOptions {
    /// Number of top candidates judged.
    pub limit: usize,
    /// Value ordering of the ranking.
    pub order: SortOrder,
    /// Number of randomized rankings averaged.
    pub iterations: usize,
    /// Also accept a candidate whose lower-cased text is a gold term.
    pub ignore_case: bool,
    /// Largest candidate order considered.
    pub n_max: Option<usize>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            order: SortOrder::Desc,
            iterations: 1000,
            ignore_case: true,
            n_max: None,
        }
    }
}

/// Averaged evaluation figures. Percentages are in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Candidates judged per ranking.
    pub limit: usize,
    /// Mean number of correct candidates.
    pub correct: f64,
    /// Mean number of candidates judged.
    pub total: f64,
    /// Precision, in percent.
    pub precision: f64,
    /// Recall against the gold list, in percent.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

/// Evaluates the top `limit` candidates against gold terms.
///
/// Ties in the ranking are broken randomly, seeded by the iteration index, and
/// counts are averaged over all iterations. Degenerate totals give all-zero
/// figures.
pub fn evaluate(
    table: &CandidateTable,
    gold_terms: &[String],
    options: &EvaluationOptions,
) -> Evaluation {
    let gold: HashSet<&str> = gold_terms
        .iter()
        .map(String::as_str)
        .filter(|t| !t.trim().is_empty())
        .collect();
    let rank_options = RankOptions {
        order: options.order,
        n_max: options.n_max,
        limit: Some(options.limit),
        ..RankOptions::default()
    };

    let iterations = options.iterations.max(1);
    let mut correct = 0usize;
    let mut total = 0usize;
    for seed in 0..iterations {
        for ranked in rank_candidates(table, &rank_options, seed as u64) {
            total += 1;
            let text = ranked.candidate.text.as_str();
            let hit = gold.contains(text)
                || (options.ignore_case && gold.contains(text.to_lowercase().as_str()));
            if hit {
                correct += 1;
            }
        }
    }

    let correct = correct as f64 / iterations as f64;
    let total = total as f64 / iterations as f64;
    let precision = 100.0 * correct / total;
    let recall = 100.0 * correct / gold.len() as f64;
    let f1 = 2.0 * precision * recall / (precision + recall);

    if ![precision, recall, f1].iter().all(|v| v.is_finite()) {
        log::warn!("evaluation is degenerate: {correct} correct of {total}");
        return Evaluation {
            limit: options.limit,
            ..Evaluation::default()
        };
    }

    Evaluation {
        limit: options.limit,
        correct,
        total,
        precision,
        recall,
        f1,
    }
}
