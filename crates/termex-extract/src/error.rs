//! Error types for the extraction pipeline.

use termex_pattern::PatternError;
use thiserror::Error;

/// Errors raised by pipeline stages.
///
/// Numeric degeneracies inside association measures are never errors; they
/// score as 0.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Association measure name not in the registry.
    #[error("unknown association measure: {0}")]
    UnknownMeasure(String),

    /// TSR policy name not recognized.
    #[error("unknown TSR policy: {0} (expected strict, flexible or combined)")]
    UnknownPolicy(String),

    /// Sort order name not recognized.
    #[error("invalid sort order: {0} (expected desc or asc)")]
    InvalidSortOrder(String),

    /// An exclusion regexp failed to compile.
    #[error("invalid exclusion regexp '{pattern}': {source}")]
    InvalidExclusionRegex {
        /// Regexp source text.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// A linguistic pattern failed to parse or compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
