//! N-gram frequency collection.
//!
//! N-grams are contiguous token runs inside a single segment; they never span
//! segment boundaries. Each collection returns fresh tables that replace any
//! earlier ones.

use std::{
    collections::{BTreeMap, HashMap},
    mem,
};

use serde::{Deserialize, Serialize};
use termex_config::NgramSettings;
use termex_pattern::{TaggedToken, surface_of};

use crate::{
    corpus::{Corpus, TaggedCorpus},
    tokenize::Tokenizer,
};

/// One n-gram and its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRecord {
    /// Tokens joined by single spaces.
    pub text: String,
    /// Order; always the token count of `text`.
    pub n: usize,
    /// Occurrences across the corpus.
    pub frequency: u64,
}

/// N-gram records ordered by descending frequency, ties by text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NgramRecord>", into = "Vec<NgramRecord>")]
pub struct NgramTable {
    /// Sorted records.
    records: Vec<NgramRecord>,
}

impl NgramTable {
    /// Builds a table from records, establishing the frequency order.
    pub fn from_records(mut records: Vec<NgramRecord>) -> Self {
        records.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.text.cmp(&b.text)));
        Self { records }
    }

    /// Iterates records by descending frequency.
    pub fn iter(&self) -> impl Iterator<Item = &NgramRecord> {
        self.records.iter()
    }

    /// Looks up a record by text.
    pub fn get(&self, text: &str) -> Option<&NgramRecord> {
        self.records.iter().find(|r| r.text == text)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<NgramRecord>> for NgramTable {
    fn from(records: Vec<NgramRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<NgramTable> for Vec<NgramRecord> {
    fn from(table: NgramTable) -> Self {
        table.records
    }
}

/// Unigram token frequencies, unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable {
    /// Token to frequency.
    counts: BTreeMap<String, u64>,
}

impl TokenTable {
    /// Frequency of a token, 0 when unseen.
    pub fn frequency(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all token frequencies.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates tokens in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, f)| (t.as_str(), *f))
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no tokens were seen.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Result of [`collect_ngrams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramCounts {
    /// N-grams at or above the minimum frequency.
    pub ngrams: NgramTable,
    /// Every token of the corpus.
    pub tokens: TokenTable,
}

/// Counts every n-gram of order `n_min..=n_max` in the corpus.
///
/// An `n_min` of 0 is treated as 1. When `n_min > n_max` the n-gram table is
/// empty, but tokens are still counted.
pub fn collect_ngrams(
    corpus: &Corpus,
    tokenizer: &dyn Tokenizer,
    settings: &NgramSettings,
) -> NgramCounts {
    let n_min = settings.n_min.max(1);
    let mut ngram_counts: HashMap<String, (usize, u64)> = HashMap::new();
    let mut tokens = TokenTable::default();

    for segment in corpus.iter() {
        let segment_tokens = tokenizer.tokenize(&segment.text);
        for n in n_min..=settings.n_max {
            for window in segment_tokens.windows(n) {
                ngram_counts.entry(window.join(" ")).or_insert((n, 0)).1 += 1;
            }
        }
        for token in segment_tokens {
            *tokens.counts.entry(token).or_insert(0) += 1;
        }
    }

    let total = ngram_counts.len();
    let records = ngram_counts
        .into_iter()
        .filter(|(_, (_, frequency))| *frequency >= settings.min_frequency)
        .map(|(text, (n, frequency))| NgramRecord { text, n, frequency })
        .collect();
    let ngrams = NgramTable::from_records(records);

    log::info!(
        "collected {} distinct n-grams, kept {} with frequency >= {}",
        total,
        ngrams.len(),
        settings.min_frequency
    );
    NgramCounts { ngrams, tokens }
}

/// One tagged n-gram and its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedNgramRecord {
    /// Surface forms joined by spaces.
    pub surface: String,
    /// Tagged tokens joined by spaces.
    pub tagged: String,
    /// Order.
    pub n: usize,
    /// Occurrences across the corpus.
    pub frequency: u64,
}

/// Tagged n-gram records ordered by descending frequency, ties by tagged text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TaggedNgramRecord>", into = "Vec<TaggedNgramRecord>")]
pub struct TaggedNgramTable {
    /// Sorted records.
    records: Vec<TaggedNgramRecord>,
}

impl TaggedNgramTable {
    /// Builds a table from records, establishing the frequency order.
    pub fn from_records(mut records: Vec<TaggedNgramRecord>) -> Self {
        records.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.tagged.cmp(&b.tagged))
        });
        Self { records }
    }

    /// Iterates records by descending frequency.
    pub fn iter(&self) -> impl Iterator<Item = &TaggedNgramRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<TaggedNgramRecord>> for TaggedNgramTable {
    fn from(records: Vec<TaggedNgramRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<TaggedNgramTable> for Vec<TaggedNgramRecord> {
    fn from(table: TaggedNgramTable) -> Self {
        table.records
    }
}

/// Counts tagged n-grams of order `n_min..=n_max`.
///
/// Segments split on whitespace into `form|lemma|tag` tokens. A malformed
/// token acts as a boundary: no n-gram contains it.
pub fn collect_tagged_ngrams(corpus: &TaggedCorpus, settings: &NgramSettings) -> TaggedNgramTable {
    let n_min = settings.n_min.max(1);
    let mut counts: HashMap<String, (usize, u64)> = HashMap::new();
    let mut malformed = 0usize;

    for segment in corpus.iter() {
        for run in well_formed_runs(&segment.text, &mut malformed) {
            for n in n_min..=settings.n_max {
                for window in run.windows(n) {
                    counts.entry(window.join(" ")).or_insert((n, 0)).1 += 1;
                }
            }
        }
    }

    if malformed > 0 {
        log::warn!("skipped {malformed} malformed tagged tokens");
    }

    let records = counts
        .into_iter()
        .filter(|(_, (_, frequency))| *frequency >= settings.min_frequency)
        .map(|(tagged, (n, frequency))| TaggedNgramRecord {
            surface: surface_of(&tagged),
            tagged,
            n,
            frequency,
        })
        .collect();
    let table = TaggedNgramTable::from_records(records);
    log::info!("kept {} tagged n-grams", table.len());
    table
}

/// Splits a tagged segment into runs of well-formed tokens.
fn well_formed_runs<'a>(text: &'a str, malformed: &mut usize) -> Vec<Vec<&'a str>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for token in text.split_whitespace() {
        if TaggedToken::parse(token).is_some() {
            current.push(token);
        } else {
            log::debug!("malformed tagged token: {token}");
            *malformed += 1;
            if !current.is_empty() {
                runs.push(mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tokenize::WhitespaceTokenizer;

    fn settings(n_min: usize, n_max: usize, min_frequency: u64) -> NgramSettings {
        NgramSettings {
            n_min,
            n_max,
            min_frequency,
        }
    }

    #[test]
    fn basic_extraction_scenario() {
        let corpus = Corpus::from_lines(["the big data lake is full"]);
        let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings(2, 3, 1));

        let big_data = counts.ngrams.get("big data").unwrap();
        assert_eq!((big_data.n, big_data.frequency), (2, 1));
        let data_lake = counts.ngrams.get("data lake").unwrap();
        assert_eq!((data_lake.n, data_lake.frequency), (2, 1));
        let big_data_lake = counts.ngrams.get("big data lake").unwrap();
        assert_eq!((big_data_lake.n, big_data_lake.frequency), (3, 1));
        // 5 bigrams + 4 trigrams
        assert_eq!(counts.ngrams.len(), 9);
        assert_eq!(counts.tokens.total(), 6);
    }

    #[test]
    fn order_equals_token_count() {
        let corpus = Corpus::from_lines(["a b c d", "b c d e", "a b"]);
        let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings(1, 4, 1));
        for record in counts.ngrams.iter() {
            assert_eq!(record.n, record.text.split(' ').count());
        }
    }

    #[test]
    fn ngrams_do_not_cross_segments() {
        let corpus = Corpus::from_lines(["big data", "lake"]);
        let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings(2, 2, 1));
        assert!(counts.ngrams.get("data lake").is_none());
        assert_eq!(counts.ngrams.len(), 1);
    }

    #[test]
    fn min_frequency_and_order() {
        let corpus = Corpus::from_lines(["data lake", "data lake", "big data"]);
        let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings(0, 2, 2));

        let texts: Vec<&str> = counts.ngrams.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["data", "data lake", "lake"]);
        // The token table is not filtered.
        assert_eq!(counts.tokens.frequency("big"), 1);
    }

    #[test]
    fn inverted_range_is_empty() {
        let corpus = Corpus::from_lines(["a b c"]);
        let counts = collect_ngrams(&corpus, &WhitespaceTokenizer, &settings(3, 2, 1));
        assert!(counts.ngrams.is_empty());
        assert_eq!(counts.tokens.len(), 3);
    }

    #[test]
    fn tagged_ngrams_with_surface() {
        let corpus = TaggedCorpus::from_lines([
            "the|the|DT big|big|JJ lakes|lake|NNS",
            "big|big|JJ lakes|lake|NNS",
        ]);
        let table = collect_tagged_ngrams(&corpus, &settings(2, 2, 2));
        assert_eq!(table.len(), 1);
        let record = table.iter().next().unwrap();
        assert_eq!(record.tagged, "big|big|JJ lakes|lake|NNS");
        assert_eq!(record.surface, "big lakes");
        assert_eq!((record.n, record.frequency), (2, 2));
    }

    #[test]
    fn malformed_tagged_token_is_a_boundary() {
        let corpus = TaggedCorpus::from_lines(["big|big|JJ oops lakes|lake|NNS"]);
        let table = collect_tagged_ngrams(&corpus, &settings(1, 2, 1));
        let tagged: Vec<&str> = table.iter().map(|r| r.tagged.as_str()).collect();
        assert_eq!(tagged, vec!["big|big|JJ", "lakes|lake|NNS"]);
    }

    #[test]
    fn stored_tables_are_reordered_on_load() {
        let json = r#"[
            {"text": "lake", "n": 1, "frequency": 1},
            {"text": "data lake", "n": 2, "frequency": 4},
            {"text": "big data", "n": 2, "frequency": 4}
        ]"#;
        let table: NgramTable = serde_json::from_str(json).unwrap();
        let texts: Vec<&str> = table.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["big data", "data lake", "lake"]);

        let back = serde_json::to_value(&table).unwrap();
        assert_eq!(back[0]["text"], "big data");
    }

    #[test]
    fn stored_tagged_tables_are_reordered_on_load() {
        let json = r#"[
            {"surface": "big", "tagged": "big|big|JJ", "n": 1, "frequency": 1},
            {"surface": "lakes", "tagged": "lakes|lake|NNS", "n": 1, "frequency": 3}
        ]"#;
        let table: TaggedNgramTable = serde_json::from_str(json).unwrap();
        let first = table.iter().next().unwrap();
        assert_eq!(first.surface, "lakes");
    }
}
