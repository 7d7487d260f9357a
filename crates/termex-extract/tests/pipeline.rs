//! End-to-end runs of the extraction pipeline on a small corpus.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use termex_extract::{
    AssociationMeasure, CooccurrenceCounts, Corpus, EvaluationOptions, NgramSettings,
    RankOptions, StopwordSets, Stopwords, TsrPolicy, WhitespaceTokenizer, case_normalization,
    collect_ngrams, evaluate, rank_candidates, score_candidates, statistical_extraction, tsr,
};

/// Corpus shared by the tests.
fn corpus() -> Corpus {
    Corpus::from_lines([
        "the big data lake is full",
        "the Big data lake is full",
        "the big data lake is full",
    ])
}

/// Boundary stop-words `the` and `is`.
fn stopwords() -> StopwordSets {
    StopwordSets {
        boundary: Stopwords::from_words(["the", "is"]),
        inner: Stopwords::new(),
    }
}

/// Owned copies of term literals.
fn strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

#[test]
fn extract_score_and_rank() {
    let corpus = corpus();
    let settings = NgramSettings::default();
    let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings);
    assert_eq!(counts.tokens.total(), 18);

    let candidates = statistical_extraction(&counts.ngrams, &stopwords(), settings.min_frequency);
    assert!(candidates.contains("big data lake"));
    assert!(candidates.contains("lake is full"));
    assert!(!candidates.contains("the big"));

    let cooccurrence = CooccurrenceCounts::from_corpus(&corpus, &WhitespaceTokenizer, 3);
    let report = score_candidates(&candidates, &cooccurrence, AssociationMeasure::Pmi, &[2, 3]);
    assert!(report.skipped_orders.is_empty());

    // "big" 2, "data" 3, "big data" 2 over 18 tokens
    let big_data = report.table.get("big data").unwrap();
    assert_eq!(big_data.measure.as_deref(), Some("pmi"));
    assert!((big_data.value.unwrap() - 6f64.log2()).abs() < 1e-9);

    // "big" never appears without "data", so n_io is empty
    let report = score_candidates(
        &candidates,
        &cooccurrence,
        AssociationMeasure::LogLikelihood,
        &[2],
    );
    let big_data = report.table.get("big data").unwrap();
    assert_eq!(big_data.measure.as_deref(), Some("loglikelihood"));
    assert_eq!(big_data.value, Some(0.0));
    assert_eq!(report.table.get("big").unwrap().measure.as_deref(), Some("freq"));

    let options = RankOptions {
        n_min: Some(2),
        ..RankOptions::default()
    };
    let ranked = rank_candidates(&report.table, &options, 0);
    assert!(ranked.iter().all(|r| r.candidate.n >= 2));
    assert!(
        ranked
            .windows(2)
            .all(|w| w[0].candidate.value >= w[1].candidate.value)
    );
}

#[test]
fn case_merge_then_propagate() {
    let settings = NgramSettings {
        min_frequency: 1,
        ..NgramSettings::default()
    };
    let counts = collect_ngrams(&corpus(), &WhitespaceTokenizer, &settings);
    let candidates = statistical_extraction(&counts.ngrams, &stopwords(), 1);
    let before = candidates.total_frequency();

    let merged = case_normalization(&candidates);
    assert_eq!(merged.total_frequency(), before);
    assert!(!merged.contains("Big data"));
    assert!(candidates.contains("Big data"));

    let outcome = tsr(&merged, &strings(&["big data"]), TsrPolicy::Strict, 100);
    assert!(outcome.table.contains("big data"));
    assert!(outcome.table.iter().all(|c| c.measure.as_deref() == Some("tsr")));
    assert_eq!(outcome.sizes.len() as u64, outcome.iterations);
}

#[test]
fn evaluate_against_gold() {
    let corpus = corpus();
    let settings = NgramSettings::default();
    let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings);
    let candidates = statistical_extraction(&counts.ngrams, &stopwords(), settings.min_frequency);

    let options = EvaluationOptions {
        limit: candidates.len(),
        iterations: 10,
        ..EvaluationOptions::default()
    };
    let result = evaluate(&candidates, &strings(&["big data", "data lake"]), &options);
    assert_eq!(result.correct, 2.0);
    assert_eq!(result.recall, 100.0);
    assert!(result.precision > 0.0 && result.precision < 100.0);
}
