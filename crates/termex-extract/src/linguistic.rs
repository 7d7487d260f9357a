//! Pattern-based extraction over tagged n-grams, and pattern learning.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use termex_pattern::{PatternSet, TaggedToken};

use crate::{candidate::CandidateTable, ngram::TaggedNgramTable, stopwords::Stopwords};

/// Extracts candidates from tagged n-grams with linguistic patterns.
///
/// Tagged n-grams are visited by descending frequency and the scan stops at the
/// first one below `min_frequency`. An n-gram whose first or last lemma is a
/// stop-word is skipped. The first pattern that matches the whole n-gram
/// yields the candidate; frequencies of repeated candidates are summed.
pub fn linguistic_extraction(
    tagged_ngrams: &TaggedNgramTable,
    patterns: &PatternSet,
    stopwords: &Stopwords,
    min_frequency: u64,
) -> CandidateTable {
    let mut table = CandidateTable::new();

    for record in tagged_ngrams.iter() {
        if record.frequency < min_frequency {
            break;
        }
        if has_stopword_boundary(&record.tagged, stopwords) {
            continue;
        }
        if let Some(candidate) = patterns.extract(&record.tagged) {
            log::debug!("'{}' -> '{candidate}'", record.tagged);
            table.add_frequency(&candidate, record.frequency);
        }
    }

    log::info!(
        "linguistic extraction produced {} candidates from {} patterns",
        table.len(),
        patterns.len()
    );
    table
}

/// Checks the lemmas of the first and last tagged tokens.
fn has_stopword_boundary(tagged: &str, stopwords: &Stopwords) -> bool {
    let mut tokens = tagged.split(' ');
    let first = tokens.next();
    let last = tokens.next_back().or(first);
    [first, last]
        .into_iter()
        .flatten()
        .filter_map(TaggedToken::parse)
        .any(|token| stopwords.contains(token.lemma))
}

/// A pattern learned from gold terms, with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnedPattern {
    /// Pattern source text.
    pub pattern: String,
    /// Sum of the orders of the tagged n-grams that produced it.
    pub weight: u64,
}

/// Derives linguistic patterns from tagged n-grams whose surface is a gold term.
///
/// Each position becomes `|#|TAG` when the surface token equals the lemma,
/// `#||TAG` when it equals only the form, and an empty spec otherwise. Every
/// matching tagged n-gram adds its order to the pattern's weight. Patterns are
/// returned by descending weight, ties by text, while the share of weight
/// emitted before each pattern is at most `representativity` percent.
pub fn learn_patterns(
    tagged_ngrams: &TaggedNgramTable,
    gold_terms: &[String],
    representativity: f64,
) -> Vec<LearnedPattern> {
    let gold: BTreeSet<&str> = gold_terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let mut weights: HashMap<String, u64> = HashMap::new();
    for record in tagged_ngrams.iter() {
        if !gold.contains(record.surface.as_str()) {
            continue;
        }
        let Some(pattern) = generalize(&record.surface, &record.tagged) else {
            log::warn!("cannot generalize malformed n-gram '{}'", record.tagged);
            continue;
        };
        *weights.entry(pattern).or_insert(0) += record.n as u64;
    }

    let total: u64 = weights.values().sum();
    let mut sorted: Vec<LearnedPattern> = weights
        .into_iter()
        .map(|(pattern, weight)| LearnedPattern { pattern, weight })
        .collect();
    sorted.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.pattern.cmp(&b.pattern)));

    let mut emitted = Vec::new();
    let mut accumulated = 0u64;
    for learned in sorted {
        let percent = 100.0 * accumulated as f64 / total as f64;
        if percent > representativity {
            break;
        }
        accumulated += learned.weight;
        emitted.push(learned);
    }

    log::info!("learned {} patterns", emitted.len());
    emitted
}

/// Builds the pattern for one tagged n-gram and its surface text.
fn generalize(surface: &str, tagged: &str) -> Option<String> {
    let specs = surface
        .split(' ')
        .zip(tagged.split(' '))
        .map(|(word, token)| {
            let token = TaggedToken::parse(token)?;
            let spec = if word == token.lemma {
                format!("|#|{}", token.tag)
            } else if word == token.form {
                format!("#||{}", token.tag)
            } else {
                String::new()
            };
            Some(spec)
        })
        .collect::<Option<Vec<_>>>()?;
    Some(specs.join(" "))
}

#[cfg(test)]
mod test {
    use termex_config::NgramSettings;
    use termex_pattern::CompiledPattern;

    use super::*;
    use crate::{corpus::TaggedCorpus, ngram::collect_tagged_ngrams};

    fn tagged_table(lines: &[&str], n_max: usize) -> TaggedNgramTable {
        let settings = NgramSettings {
            n_min: 1,
            n_max,
            min_frequency: 1,
        };
        collect_tagged_ngrams(&TaggedCorpus::from_lines(lines), &settings)
    }

    fn patterns(sources: &[&str]) -> PatternSet {
        PatternSet::from_lines(sources).unwrap()
    }

    #[test]
    fn extracts_with_first_matching_pattern() {
        let table = tagged_table(
            &[
                "the|the|DT big|big|JJ data|datum|NNS lake|lake|NN",
                "big|big|JJ data|datum|NNS lake|lake|NN",
            ],
            3,
        );
        let set = patterns(&["#|| #||NN", "#||JJ #|| #||NN"]);
        let candidates = linguistic_extraction(&table, &set, &Stopwords::new(), 1);

        let data_lake = candidates.get("data lake").unwrap();
        assert_eq!(data_lake.frequency, 2);
        assert_eq!(data_lake.n, 2);
        assert_eq!(candidates.get("big data lake").unwrap().frequency, 2);
    }

    #[test]
    fn lemma_stopwords_block_boundaries() {
        let table = tagged_table(&["the|the|DT lake|lake|NN", "lake|lake|NN is|be|VBZ"], 2);
        let set = patterns(&["#|| #||"]);
        let stopwords = Stopwords::from_words(["the", "be"]);
        let candidates = linguistic_extraction(&table, &set, &stopwords, 1);
        assert!(candidates.is_empty());
    }

    #[test]
    fn duplicate_candidates_are_summed() {
        // Two different tagged n-grams yield the same lemma candidate.
        let table = tagged_table(
            &["lakes|lake|NNS", "lake|lake|NN", "lake|lake|NN"],
            1,
        );
        let set = patterns(&["|#|.*"]);
        let candidates = linguistic_extraction(&table, &set, &Stopwords::new(), 1);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.get("lake").unwrap().frequency, 3);
    }

    #[test]
    fn stops_below_min_frequency() {
        let table = tagged_table(&["lake|lake|NN", "lake|lake|NN", "sea|sea|NN"], 1);
        let set = patterns(&["#||NN"]);
        let candidates = linguistic_extraction(&table, &set, &Stopwords::new(), 2);
        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains("lake"));
    }

    #[test]
    fn learns_patterns_from_gold_terms() {
        let table = tagged_table(
            &[
                "big|big|JJ lakes|lake|NNS",
                "big|big|JJ lakes|lake|NNS",
                "data|datum|NNS lake|lake|NN",
            ],
            2,
        );
        let gold = vec!["big lakes".to_string(), "data lake".to_string()];
        let learned = learn_patterns(&table, &gold, 100.0);

        assert_eq!(
            learned,
            vec![
                LearnedPattern {
                    pattern: "#||NNS |#|NN".to_string(),
                    weight: 2,
                },
                LearnedPattern {
                    pattern: "|#|JJ #||NNS".to_string(),
                    weight: 2,
                },
            ]
        );
    }

    #[test]
    fn representativity_cuts_the_tail() {
        let table = tagged_table(
            &[
                "big|big|JJ lakes|lake|NNS",
                "red|red|JJ lakes|lake|NNS",
                "cold|cold|JJ seas|sea|NNS",
                "data|datum|NNS lake|lake|NN",
            ],
            2,
        );
        let gold: Vec<String> = ["big lakes", "red lakes", "cold seas", "data lake"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        // 6 of 8 weight is emitted before the second pattern: 75% > 50%.
        let learned = learn_patterns(&table, &gold, 50.0);
        assert_eq!(learned.len(), 1);
        assert_eq!(learned[0].pattern, "|#|JJ #||NNS");
        assert_eq!(learned[0].weight, 6);
    }

    #[test]
    fn learned_pattern_extracts_its_term() {
        let tagged = "data|datum|NNS lake|lake|NN";
        let table = tagged_table(&[tagged], 2);
        let learned = learn_patterns(&table, &["data lake".to_string()], 100.0);

        let compiled = CompiledPattern::from_source(&learned[0].pattern).unwrap();
        assert_eq!(compiled.extract(tagged).as_deref(), Some("data lake"));
    }
}
