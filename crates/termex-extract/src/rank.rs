//! Candidate ranking for listings and evaluation.
//!
//! Candidates are ordered by value, then by descending frequency. Remaining
//! ties are broken by a seeded hash of the text, so a seed fixes one of the
//! equally ranked orderings.

use std::{
    cmp::Ordering,
    collections::HashSet,
    hash::{Hash, Hasher},
    str::FromStr,
};

use siphasher::sip::SipHasher24;

use crate::{
    ExtractError,
    candidate::{CandidateTable, TermCandidate},
};

/// Direction of the value ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest value first.
    #[default]
    Desc,
    /// Lowest value first.
    Asc,
}

impl FromStr for SortOrder {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desc" => Ok(Self::Desc),
            "asc" => Ok(Self::Asc),
            _ => Err(ExtractError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Filters and limits applied while ranking.
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Value ordering.
    pub order: SortOrder,
    /// Smallest order listed.
    pub n_min: Option<usize>,
    /// Largest order listed.
    pub n_max: Option<usize>,
    /// Candidates never listed.
    pub exclude: HashSet<String>,
    /// Known terms; listed candidates found here are marked.
    pub known_terms: HashSet<String>,
    /// Maximum number of candidates returned.
    pub limit: Option<usize>,
}

/// A ranked candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// 1-based rank.
    pub rank: usize,
    /// The candidate.
    pub candidate: TermCandidate,
    /// True if the candidate is a known term.
    pub known: bool,
}

/// Ranks candidates by value, then frequency, then a seeded tie-break.
///
/// A missing value sorts as 0.
pub fn rank_candidates(
    table: &CandidateTable,
    options: &RankOptions,
    seed: u64,
) -> Vec<RankedCandidate> {
    let mut selected: Vec<(&TermCandidate, u64)> = table
        .iter()
        .filter(|c| options.n_min.is_none_or(|n_min| c.n >= n_min))
        .filter(|c| options.n_max.is_none_or(|n_max| c.n <= n_max))
        .filter(|c| !options.exclude.contains(&c.text))
        .map(|c| (c, tie_break(&c.text, seed)))
        .collect();

    selected.sort_by(|(a, ha), (b, hb)| {
        let by_value = compare_values(a, b);
        let by_value = match options.order {
            SortOrder::Desc => by_value.reverse(),
            SortOrder::Asc => by_value,
        };
        by_value
            .then_with(|| b.frequency.cmp(&a.frequency))
            .then_with(|| ha.cmp(hb))
            .then_with(|| a.text.cmp(&b.text))
    });

    let limit = options.limit.unwrap_or(usize::MAX);
    selected
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (candidate, _))| RankedCandidate {
            rank: i + 1,
            candidate: candidate.clone(),
            known: options.known_terms.contains(&candidate.text),
        })
        .collect()
}

/// Ascending comparison of candidate values.
fn compare_values(a: &TermCandidate, b: &TermCandidate) -> Ordering {
    a.value.unwrap_or(0.0).total_cmp(&b.value.unwrap_or(0.0))
}

/// Seeded hash of a candidate's text.
fn tie_break(text: &str, seed: u64) -> u64 {
    let mut hasher = SipHasher24::new_with_keys(seed, 0);
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn candidate(text: &str, frequency: u64, value: Option<f64>) -> TermCandidate {
        TermCandidate {
            text: text.to_string(),
            n: text.split(' ').count(),
            frequency,
            measure: value.map(|_| "pmi".to_string()),
            value,
        }
    }

    fn texts(ranked: &[RankedCandidate]) -> Vec<&str> {
        ranked.iter().map(|r| r.candidate.text.as_str()).collect()
    }

    fn sample() -> CandidateTable {
        vec![
            candidate("data lake", 3, Some(2.5)),
            candidate("big data", 9, Some(2.5)),
            candidate("big data lake", 1, Some(7.0)),
            candidate("lake", 4, None),
            candidate("cold storage", 2, Some(-1.0)),
        ]
        .into()
    }

    #[test]
    fn desc_by_value_then_frequency() {
        let ranked = rank_candidates(&sample(), &RankOptions::default(), 0);
        assert_eq!(
            texts(&ranked),
            vec!["big data lake", "big data", "data lake", "lake", "cold storage"]
        );
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[4].rank, 5);
    }

    #[test]
    fn asc_order() {
        let options = RankOptions {
            order: SortOrder::Asc,
            ..RankOptions::default()
        };
        let ranked = rank_candidates(&sample(), &options, 0);
        assert_eq!(
            texts(&ranked),
            vec!["cold storage", "lake", "big data", "data lake", "big data lake"]
        );
    }

    #[test]
    fn filters_and_limit() {
        let options = RankOptions {
            n_min: Some(2),
            n_max: Some(2),
            exclude: ["big data".to_string()].into_iter().collect(),
            known_terms: ["data lake".to_string()].into_iter().collect(),
            limit: Some(1),
            ..RankOptions::default()
        };
        let ranked = rank_candidates(&sample(), &options, 0);
        assert_eq!(texts(&ranked), vec!["data lake"]);
        assert!(ranked[0].known);
    }

    #[test]
    fn seed_orders_full_ties_deterministically() {
        let table: CandidateTable = (0..20)
            .map(|i| candidate(&format!("term {i}"), 1, Some(1.0)))
            .collect();
        let options = RankOptions::default();

        let first = rank_candidates(&table, &options, 7);
        let again = rank_candidates(&table, &options, 7);
        assert_eq!(first, again);

        let orderings: HashSet<Vec<String>> = (0..5)
            .map(|seed| {
                rank_candidates(&table, &options, seed)
                    .into_iter()
                    .map(|r| r.candidate.text)
                    .collect()
            })
            .collect();
        assert!(orderings.len() > 1);
    }

    #[test]
    fn parse_sort_order() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!(matches!(
            "up".parse::<SortOrder>(),
            Err(ExtractError::InvalidSortOrder(_))
        ));
    }
}
