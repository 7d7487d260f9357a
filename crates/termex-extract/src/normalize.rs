//! Candidate normalization: case folding and nested-candidate pruning.

use crate::candidate::{CandidateTable, MEASURE_FREQ};

/// Merges capitalized candidates into their lower-cased forms.
///
/// Every candidate of the input is considered once: when it differs from its
/// lower-cased text and that text is also a candidate, it is removed and its
/// frequency is added to the lower-cased entry, which is rescored by frequency.
/// Merges never cascade within a pass, and total frequency is preserved.
pub fn case_normalization(table: &CandidateTable) -> CandidateTable {
    let mut normalized = table.clone();
    let mut merged = 0usize;

    for candidate in table.by_frequency() {
        let lower = candidate.text.to_lowercase();
        if lower == candidate.text || !table.contains(&lower) {
            continue;
        }
        normalized.remove(&candidate.text);
        if let Some(target) = normalized.get_mut(&lower) {
            target.frequency += candidate.frequency;
            target.measure = Some(MEASURE_FREQ.to_string());
            target.value = Some(target.frequency as f64);
            log::debug!(
                "merged '{}' into '{}' ({})",
                candidate.text,
                lower,
                target.frequency
            );
        }
        merged += 1;
    }

    log::info!("case normalization merged {merged} candidates");
    normalized
}

/// Removes candidates nested in a longer candidate of similar frequency.
///
/// For each candidate A, by descending frequency, A is removed when a remaining
/// candidate B of order `n(A) + 1 <= n_max` contains A's text and has a
/// frequency within `percent` percent of A's.
pub fn nest_normalization(table: &CandidateTable, percent: f64, n_max: usize) -> CandidateTable {
    let mut pruned = table.clone();
    let mut removed = 0usize;

    for a in table.by_frequency() {
        let n_b = a.n + 1;
        if n_b > n_max {
            continue;
        }
        let f_a = a.frequency as f64;
        let f_max = f_a + f_a * percent / 100.0;
        let f_min = f_a - f_a * percent / 100.0;

        let container = pruned.iter().find(|b| {
            let f_b = b.frequency as f64;
            b.n == n_b && f_b >= f_min && f_b <= f_max && b.text != a.text && b.text.contains(&a.text)
        });
        if let Some(b) = container {
            log::debug!("'{}' ({}) nested in '{}' ({})", a.text, a.frequency, b.text, b.frequency);
            pruned.remove(&a.text);
            removed += 1;
        }
    }

    log::info!("nested normalization removed {removed} candidates");
    pruned
}
