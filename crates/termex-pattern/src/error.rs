//! Error types for pattern parsing and compilation.

use thiserror::Error;

/// Errors that can occur when parsing or compiling a linguistic pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern source holds no token specs.
    #[error("empty linguistic pattern")]
    Empty,

    /// The translated regular expression failed to compile.
    #[error("invalid linguistic pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The pattern source text.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}
