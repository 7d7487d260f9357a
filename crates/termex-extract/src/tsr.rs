//! Termhood propagation (TSR).
//!
//! Seed terms fill boundary lexicons: first-position words, last-position
//! words, interior words, and every component word. Each iteration admits the
//! candidates whose tokens the current lexicons cover according to a
//! [`TsrPolicy`], and admitted candidates feed their own tokens back into the
//! lexicons. Lexicons only grow.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::Serialize;

use crate::{
    ExtractError,
    candidate::{CandidateTable, TermCandidate},
};

/// Measure label of admitted candidates.
pub const MEASURE_TSR: &str = "tsr";

/// Admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsrPolicy {
    /// Every applicable check must pass.
    Strict,
    /// Any applicable check may pass.
    Flexible,
    /// Strict on the first iteration, flexible afterwards.
    Combined,
}

impl TsrPolicy {
    /// Returns true if the policy admits on any passing check at this iteration.
    fn is_relaxed_at(self, iteration: u64) -> bool {
        match self {
            Self::Strict => false,
            Self::Flexible => true,
            Self::Combined => iteration > 1,
        }
    }
}

impl fmt::Display for TsrPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "strict",
            Self::Flexible => "flexible",
            Self::Combined => "combined",
        })
    }
}

impl FromStr for TsrPolicy {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "flexible" => Ok(Self::Flexible),
            "combined" => Ok(Self::Combined),
            _ => Err(ExtractError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Lower-cased boundary lexicons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lexicons {
    /// Words seen first in a term.
    pub first: BTreeSet<String>,
    /// Words seen strictly inside a term.
    pub middle: BTreeSet<String>,
    /// Words seen last in a term.
    pub last: BTreeSet<String>,
    /// Every word of a multi-word term.
    pub component: BTreeSet<String>,
}

impl Lexicons {
    /// Seeds lexicons from terms. Blank terms are skipped.
    ///
    /// A single-word term fills `first` and `last`. A multi-word term fills
    /// `first` and `last` by position, `middle` with its interior words and
    /// `component` with all of them.
    pub fn from_seeds(seeds: &[String]) -> Self {
        let mut lexicons = Self::default();
        for seed in seeds {
            let tokens: Vec<&str> = seed.split_whitespace().collect();
            match tokens.as_slice() {
                [] => log::warn!("skipping blank seed term"),
                [word] => {
                    lexicons.first.insert(word.to_lowercase());
                    lexicons.last.insert(word.to_lowercase());
                }
                _ => {
                    lexicons.absorb(&tokens);
                    lexicons
                        .component
                        .extend(tokens.iter().map(|t| t.to_lowercase()));
                }
            }
        }
        lexicons
    }

    /// Adds the first, last and interior words of an admitted term.
    fn absorb(&mut self, tokens: &[&str]) {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return;
        };
        self.first.insert(first.to_lowercase());
        self.last.insert(last.to_lowercase());
        if tokens.len() > 1 {
            self.component.insert(first.to_lowercase());
            self.component.insert(last.to_lowercase());
        }
        for word in interior(tokens) {
            self.middle.insert(word.to_lowercase());
            self.component.insert(word.to_lowercase());
        }
    }

    /// Evaluates the applicable checks for a tokenized candidate: first word,
    /// last word and, for more than two tokens, every interior word.
    fn checks(&self, tokens: &[&str]) -> Vec<bool> {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return vec![false];
        };
        let mut checks = vec![
            self.first.contains(&first.to_lowercase()),
            self.last.contains(&last.to_lowercase()),
        ];
        if tokens.len() > 2 {
            checks.push(
                interior(tokens)
                    .iter()
                    .all(|w| self.middle.contains(&w.to_lowercase())),
            );
        }
        checks
    }

    /// Current sizes.
    pub fn sizes(&self) -> LexiconSizes {
        LexiconSizes {
            first: self.first.len(),
            middle: self.middle.len(),
            last: self.last.len(),
            component: self.component.len(),
        }
    }
}

/// Tokens strictly between the first and the last.
fn interior<'a, 'b>(tokens: &'b [&'a str]) -> &'b [&'a str] {
    tokens.get(1..tokens.len().saturating_sub(1)).unwrap_or(&[])
}

/// Lexicon sizes after an iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LexiconSizes {
    /// Size of `first`.
    pub first: usize,
    /// Size of `middle`.
    pub middle: usize,
    /// Size of `last`.
    pub last: usize,
    /// Size of `component`.
    pub component: usize,
}

/// Result of [`tsr`].
#[derive(Debug, Clone)]
pub struct TsrOutcome {
    /// Admitted candidates; replaces the input table.
    pub table: CandidateTable,
    /// Number of iterations run.
    pub iterations: u64,
    /// Final lexicons.
    pub lexicons: Lexicons,
    /// Lexicon sizes after each iteration.
    pub sizes: Vec<LexiconSizes>,
}

/// Runs termhood propagation over the candidates.
///
/// Candidates are scanned by descending frequency, ties by text, and lexicons
/// are updated as soon as a candidate is admitted. An admitted candidate keeps
/// its frequency and gets measure `tsr` with value `max_iterations - iteration`.
/// The loop ends after an iteration that admits nothing (the first iteration of
/// [`TsrPolicy::Combined`] always continues) or once `max_iterations` is
/// reached.
pub fn tsr(
    table: &CandidateTable,
    seeds: &[String],
    policy: TsrPolicy,
    max_iterations: u64,
) -> TsrOutcome {
    let max_iterations = max_iterations.max(1);
    let mut lexicons = Lexicons::from_seeds(seeds);
    let mut admitted = CandidateTable::new();
    let mut sizes = Vec::new();
    let pool = table.by_frequency();

    let mut iteration = 0u64;
    loop {
        iteration += 1;
        let relaxed = policy.is_relaxed_at(iteration);
        let value = max_iterations.saturating_sub(iteration) as f64;
        let mut admitted_now = 0usize;

        for candidate in &pool {
            if admitted.contains(&candidate.text) {
                continue;
            }
            let tokens = candidate.tokens();
            let checks = lexicons.checks(&tokens);
            let admit = if relaxed {
                checks.iter().any(|&c| c)
            } else {
                checks.iter().all(|&c| c)
            };
            if !admit {
                continue;
            }
            lexicons.absorb(&tokens);
            admitted.insert(TermCandidate {
                text: candidate.text.clone(),
                n: candidate.n,
                frequency: candidate.frequency,
                measure: Some(MEASURE_TSR.to_string()),
                value: Some(value),
            });
            admitted_now += 1;
        }

        sizes.push(lexicons.sizes());
        log::info!("tsr iteration {iteration} ({policy}) admitted {admitted_now} candidates");

        let seeding = policy == TsrPolicy::Combined && iteration == 1;
        if (admitted_now == 0 && !seeding) || iteration >= max_iterations {
            break;
        }
    }

    TsrOutcome {
        table: admitted,
        iterations: iteration,
        lexicons,
        sizes,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pool(entries: &[(&str, u64)]) -> CandidateTable {
        entries
            .iter()
            .map(|(text, frequency)| TermCandidate::with_frequency(*text, *frequency))
            .collect()
    }

    fn seeds(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn scenario_pool() -> CandidateTable {
        pool(&[
            ("big data", 5),
            ("big cloud", 3),
            ("small cloud", 2),
            ("red herring", 2),
        ])
    }

    #[test]
    fn seeds_fill_lexicons() {
        let lexicons = Lexicons::from_seeds(&seeds(&["Cloud", "big data lake", "  "]));
        assert!(lexicons.first.contains("cloud"));
        assert!(lexicons.last.contains("cloud"));
        assert!(lexicons.first.contains("big"));
        assert!(lexicons.last.contains("lake"));
        assert!(lexicons.middle.contains("data"));
        assert_eq!(lexicons.component.len(), 3);
        assert!(!lexicons.component.contains("cloud"));
    }

    #[test]
    fn combined_admits_shared_first_token_on_second_iteration() {
        let outcome = tsr(&scenario_pool(), &seeds(&["big data"]), TsrPolicy::Combined, 100);

        let big_data = outcome.table.get("big data").unwrap();
        assert_eq!(big_data.value, Some(99.0));
        assert_eq!(big_data.measure.as_deref(), Some("tsr"));
        assert_eq!(big_data.frequency, 5);

        let big_cloud = outcome.table.get("big cloud").unwrap();
        assert_eq!(big_cloud.value, Some(98.0));
        // "cloud" entered the last lexicon through "big cloud" in the same pass.
        assert_eq!(outcome.table.get("small cloud").unwrap().value, Some(98.0));
        assert!(!outcome.table.contains("red herring"));
        assert_eq!(outcome.iterations, 3);
    }

    #[test]
    fn strict_never_admits_partial_match() {
        let outcome = tsr(&scenario_pool(), &seeds(&["big data"]), TsrPolicy::Strict, 100);
        assert!(outcome.table.contains("big data"));
        assert!(!outcome.table.contains("big cloud"));
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(outcome.iterations, 2);
    }

    #[test]
    fn combined_continues_after_empty_seeding_iteration() {
        let candidates = pool(&[("big cloud", 3)]);
        let outcome = tsr(&candidates, &seeds(&["big data"]), TsrPolicy::Combined, 100);
        assert!(outcome.table.contains("big cloud"));
        assert_eq!(outcome.table.get("big cloud").unwrap().value, Some(98.0));
    }

    #[test]
    fn interior_tokens_must_all_be_known() {
        let candidates = pool(&[("big fast data", 4), ("big slow data", 3)]);
        let outcome = tsr(
            &candidates,
            &seeds(&["big fast data"]),
            TsrPolicy::Strict,
            100,
        );
        assert!(outcome.table.contains("big fast data"));
        assert!(!outcome.table.contains("big slow data"));
    }

    #[test]
    fn strict_is_subset_of_flexible() {
        let candidates = pool(&[
            ("big data", 9),
            ("data lake", 8),
            ("big data lake", 7),
            ("lake house", 6),
            ("data warehouse", 5),
            ("big warehouse", 4),
            ("cold storage", 3),
            ("Big Lake", 2),
            ("data", 2),
        ]);
        let seed_terms = seeds(&["big data", "data lake", "lake"]);

        let strict = tsr(&candidates, &seed_terms, TsrPolicy::Strict, 1000);
        let flexible = tsr(&candidates, &seed_terms, TsrPolicy::Flexible, 1000);
        assert!(!strict.table.is_empty());
        for candidate in strict.table.iter() {
            assert!(
                flexible.table.contains(&candidate.text),
                "{} admitted by strict only",
                candidate.text
            );
        }
        assert!(flexible.table.len() > strict.table.len());
    }

    #[test]
    fn lexicons_grow_monotonically() {
        // Each link only becomes reachable after the previous one is admitted.
        let candidates = pool(&[
            ("old house", 9),
            ("red house", 8),
            ("red lake", 7),
            ("big lake", 6),
            ("big data", 5),
        ]);
        let outcome = tsr(&candidates, &seeds(&["big data"]), TsrPolicy::Flexible, 1000);

        assert_eq!(outcome.iterations, 5);
        assert_eq!(outcome.sizes.len(), 5);
        assert_eq!(outcome.table.get("old house").unwrap().value, Some(996.0));
        for pair in outcome.sizes.windows(2) {
            assert!(pair[1].first >= pair[0].first);
            assert!(pair[1].middle >= pair[0].middle);
            assert!(pair[1].last >= pair[0].last);
            assert!(pair[1].component >= pair[0].component);
        }
        assert_eq!(outcome.table.len(), 5);
    }

    #[test]
    fn iteration_cap() {
        let candidates = pool(&[("big data", 9), ("data lake", 8), ("lake house", 6)]);
        let outcome = tsr(&candidates, &seeds(&["big data"]), TsrPolicy::Flexible, 1);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.sizes.len(), 1);
    }

    #[test]
    fn parse_policy() {
        assert_eq!("Strict".parse::<TsrPolicy>().unwrap(), TsrPolicy::Strict);
        assert_eq!("combined".parse::<TsrPolicy>().unwrap(), TsrPolicy::Combined);
        assert_eq!(TsrPolicy::Flexible.to_string(), "flexible");
        assert!(matches!(
            "loose".parse::<TsrPolicy>(),
            Err(ExtractError::UnknownPolicy(_))
        ));
    }
}
