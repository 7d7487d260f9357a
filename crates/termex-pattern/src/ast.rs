//! Pattern abstract syntax tree.
//!
//! Represents parsed linguistic patterns before compilation to regular expressions.

use std::fmt;

/// Field separator inside a tagged token and inside a token spec.
pub(crate) const FIELD_SEPARATOR: char = '|';

/// Marker that turns a field spec into a capture.
pub(crate) const CAPTURE_MARKER: char = '#';

/// A spec for one field (form, lemma or tag) of a tagged token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// `#`: capture the field, whatever it holds.
    Capture,
    /// `#text`: capture the field, which must match the fragment.
    CaptureLiteral(String),
    /// Empty spec: any non-space run, not captured.
    Wildcard,
    /// A literal regex fragment matched in place.
    Literal(String),
}

impl FieldSpec {
    /// Returns true if this field contributes to the extracted candidate.
    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture | Self::CaptureLiteral(_))
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture => write!(f, "{CAPTURE_MARKER}"),
            Self::CaptureLiteral(text) => write!(f, "{CAPTURE_MARKER}{text}"),
            Self::Wildcard => Ok(()),
            Self::Literal(text) => write!(f, "{text}"),
        }
    }
}

/// The specs for one token position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    /// Field specs in `form|lemma|tag` order. Fewer than three is allowed.
    pub fields: Vec<FieldSpec>,
}

impl TokenSpec {
    /// Number of capturing fields in this token spec.
    pub fn capture_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_capture()).count()
    }
}

impl fmt::Display for TokenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{FIELD_SEPARATOR}")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

/// A parsed linguistic pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinguisticPattern {
    /// One spec per token of the n-grams this pattern matches.
    pub tokens: Vec<TokenSpec>,
}

impl LinguisticPattern {
    /// Number of tokens a matching tagged n-gram must have.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the pattern has no token specs.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Total number of capturing fields across all tokens.
    pub fn capture_count(&self) -> usize {
        self.tokens.iter().map(TokenSpec::capture_count).sum()
    }
}

impl fmt::Display for LinguisticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_display() {
        assert_eq!(FieldSpec::Capture.to_string(), "#");
        assert_eq!(FieldSpec::CaptureLiteral("NN".into()).to_string(), "#NN");
        assert_eq!(FieldSpec::Wildcard.to_string(), "");
        assert_eq!(FieldSpec::Literal("JJ".into()).to_string(), "JJ");
    }

    #[test]
    fn pattern_display_joins_tokens() {
        let pattern = LinguisticPattern {
            tokens: vec![
                TokenSpec {
                    fields: vec![FieldSpec::Capture, FieldSpec::Wildcard, FieldSpec::Literal("JJ".into())],
                },
                TokenSpec {
                    fields: vec![
                        FieldSpec::Wildcard,
                        FieldSpec::Capture,
                        FieldSpec::Literal("NN".into()),
                    ],
                },
            ],
        };
        assert_eq!(pattern.to_string(), "#||JJ |#|NN");
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.capture_count(), 2);
    }
}
