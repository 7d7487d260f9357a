//! Tagged tokens in `form|lemma|tag` notation.

use crate::ast::FIELD_SEPARATOR;

/// One token of a tagged segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    /// Surface form as it appears in the text.
    pub form: &'a str,
    /// Dictionary form.
    pub lemma: &'a str,
    /// Part-of-speech tag.
    pub tag: &'a str,
}

impl<'a> TaggedToken<'a> {
    /// Parses a `form|lemma|tag` token. Extra fields are ignored.
    ///
    /// Returns `None` when fewer than three fields are present.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut fields = token.split(FIELD_SEPARATOR);
        let form = fields.next()?;
        let lemma = fields.next()?;
        let tag = fields.next()?;
        Some(Self { form, lemma, tag })
    }
}

/// Projects a tagged n-gram onto its surface forms.
///
/// The form is the text before the first `|` of each token, so malformed
/// tokens contribute their whole text.
pub fn surface_of(tagged_ngram: &str) -> String {
    tagged_ngram
        .split_whitespace()
        .map(|token| token.split(FIELD_SEPARATOR).next().unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ")
}
