//! Segmented corpora.
//!
//! A corpus is an append-only list of segments with monotonic ids. Plain
//! segments hold text; tagged segments hold `form|lemma|tag` tokens joined by
//! spaces.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Character joining the tokens of a compounded term.
pub const COMPOUND_MARKER: &str = "\u{2581}";

/// One line of a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position within the corpus, starting at 1.
    pub id: u64,
    /// Segment text.
    pub text: String,
}

/// An append-only sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Segments in load order.
    segments: Vec<Segment>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from lines. Trailing whitespace is trimmed; every line
    /// becomes a segment, blank lines included.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Self::new();
        for line in lines {
            corpus.push(line.as_ref().trim_end());
        }
        corpus
    }

    /// Appends a segment and returns its id.
    pub fn push(&mut self, text: &str) -> u64 {
        let id = self.next_id();
        self.segments.push(Segment {
            id,
            text: text.to_string(),
        });
        id
    }

    /// Id the next pushed segment will get.
    fn next_id(&self) -> u64 {
        self.segments.last().map_or(1, |s| s.id + 1)
    }

    /// Iterates segments in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the corpus holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A corpus of POS-tagged segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaggedCorpus {
    /// Underlying segments; text is tagged.
    inner: Corpus,
}

impl TaggedCorpus {
    /// Creates an empty tagged corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tagged corpus from lines of `form|lemma|tag` tokens.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            inner: Corpus::from_lines(lines),
        }
    }

    /// Appends a tagged segment and returns its id.
    pub fn push(&mut self, tagged_text: &str) -> u64 {
        self.inner.push(tagged_text)
    }

    /// Iterates tagged segments in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.inner.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the corpus holds no segments.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Rewrites every occurrence of a multi-word term so its tokens are joined by
/// [`COMPOUND_MARKER`].
///
/// Matching is on whole whitespace-separated tokens; longer terms are tried
/// first at each position. Single-word terms are ignored. Segment ids are
/// preserved.
pub fn compoundify(corpus: &Corpus, terms: &[String]) -> Corpus {
    let mut compounds: Vec<Vec<&str>> = terms
        .iter()
        .map(|t| t.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| tokens.len() > 1)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    compounds.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let segments = corpus
        .iter()
        .map(|segment| Segment {
            id: segment.id,
            text: compound_segment(&segment.text, &compounds),
        })
        .collect();

    log::info!(
        "compounded {} terms over {} segments",
        compounds.len(),
        corpus.len()
    );
    Corpus { segments }
}

/// Rewrites one segment. `compounds` must be sorted longest first.
fn compound_segment(text: &str, compounds: &[Vec<&str>]) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let rest = &tokens[i..];
        match compounds.iter().find(|c| rest.starts_with(c)) {
            Some(compound) => {
                out.push(compound.join(COMPOUND_MARKER));
                i += compound.len();
            }
            None => {
                out.push(tokens[i].to_string());
                i += 1;
            }
        }
    }
    out.join(" ")
}
