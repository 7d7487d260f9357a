//! Pattern parser.
//!
//! Turns pattern source text into a [`LinguisticPattern`]. The grammar is
//! positional: tokens are separated by single spaces and fields by `|`, so an
//! empty token (two consecutive spaces) is a wildcard position.

use crate::{
    ast::{CAPTURE_MARKER, FIELD_SEPARATOR, FieldSpec, LinguisticPattern, TokenSpec},
    error::PatternError,
};

/// Parses a linguistic pattern.
///
/// Trailing whitespace is ignored. Returns [`PatternError::Empty`] when nothing
/// but whitespace remains.
pub fn parse(source: &str) -> Result<LinguisticPattern, PatternError> {
    let source = source.trim_end();
    if source.trim().is_empty() {
        return Err(PatternError::Empty);
    }

    let tokens = source.split(' ').map(parse_token).collect();
    Ok(LinguisticPattern { tokens })
}

/// Parses one space-delimited token spec.
fn parse_token(token: &str) -> TokenSpec {
    TokenSpec {
        fields: token.split(FIELD_SEPARATOR).map(parse_field).collect(),
    }
}

/// Parses one `|`-delimited field spec.
fn parse_field(field: &str) -> FieldSpec {
    if field.is_empty() {
        FieldSpec::Wildcard
    } else if field == "#" {
        FieldSpec::Capture
    } else if let Some(rest) = field.strip_prefix(CAPTURE_MARKER) {
        FieldSpec::CaptureLiteral(rest.replace(CAPTURE_MARKER, ""))
    } else {
        FieldSpec::Literal(field.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_fields() {
        let pattern = parse("#||JJ |#|#NN").unwrap();
        assert_eq!(pattern.tokens.len(), 2);
        assert_eq!(
            pattern.tokens[0].fields,
            vec![
                FieldSpec::Capture,
                FieldSpec::Wildcard,
                FieldSpec::Literal("JJ".into())
            ]
        );
        assert_eq!(
            pattern.tokens[1].fields,
            vec![
                FieldSpec::Wildcard,
                FieldSpec::Capture,
                FieldSpec::CaptureLiteral("NN".into())
            ]
        );
    }

    #[test]
    fn double_space_is_wildcard_token() {
        let pattern = parse("#||NN  |#|NN").unwrap();
        assert_eq!(pattern.len(), 3);
        assert_eq!(pattern.tokens[1].fields, vec![FieldSpec::Wildcard]);
    }

    #[test]
    fn empty_pattern_is_error() {
        assert!(matches!(parse(""), Err(PatternError::Empty)));
        assert!(matches!(parse("   \t"), Err(PatternError::Empty)));
    }

    #[test]
    fn display_round_trips_source() {
        for source in ["#||JJ |#|NN", "|#|NN.* #||NN", "#||NN  |#|NN"] {
            assert_eq!(parse(source).unwrap().to_string(), source);
        }
    }
}
