//! Terminology extraction pipeline.
//!
//! Turns a plain or part-of-speech tagged corpus into a table of scored term
//! candidates. The stages are:
//!
//! 1. **N-gram collection**: Count n-grams and tokens per segment
//! 2. **Candidate extraction**: Statistical (stopword filtered) or linguistic
//!    (tag pattern matched)
//! 3. **Scoring**: Association measures over gapped co-occurrence counts, or
//!    TSR seed-lexicon expansion
//! 4. **Normalization and exclusion**: Case and nesting merges, regexp and
//!    term-list exclusion
//! 5. **Ranking and evaluation**: Seeded ordering, precision and recall
//!
//! ## Association Measures
//!
//! Measures are computed from a `2^n` contingency table built by
//! inclusion-exclusion over joint marginals, so one implementation serves
//! bigrams through quadgrams. See [`AssociationMeasure`] for the registry.

#![warn(missing_docs)]

mod association;
mod candidate;
mod corpus;
mod error;
mod evaluate;
mod linguistic;
mod measures;
mod ngram;
mod normalize;
mod rank;
mod statistical;
mod stopwords;
mod tokenize;
mod tsr;
mod unigram;

pub use association::{CooccurrenceCounts, ScoringReport, score_candidates};
pub use candidate::{CandidateTable, MEASURE_FREQ, TermCandidate};
pub use corpus::{COMPOUND_MARKER, Corpus, Segment, TaggedCorpus, compoundify};
pub use error::ExtractError;
pub use evaluate::{Evaluation, EvaluationOptions, evaluate};
pub use linguistic::{LearnedPattern, learn_patterns, linguistic_extraction};
pub use measures::{AssociationMeasure, Contingency};
pub use ngram::{
    NgramCounts, NgramRecord, NgramTable, TaggedNgramRecord, TaggedNgramTable, TokenTable,
    collect_ngrams, collect_tagged_ngrams,
};
pub use normalize::{case_normalization, nest_normalization};
pub use rank::{RankOptions, RankedCandidate, SortOrder, rank_candidates};
pub use statistical::{
    ExclusionRegex, exclude_terms, extract_from_segment, regexp_exclusion, statistical_extraction,
};
pub use stopwords::{StopwordSets, Stopwords};
pub use termex_config::NgramSettings;
pub use tokenize::{Tokenizer, Tokenizers, WhitespaceTokenizer};
pub use tsr::{LexiconSizes, Lexicons, MEASURE_TSR, TsrOutcome, TsrPolicy, tsr};
pub use unigram::select_unigrams;
