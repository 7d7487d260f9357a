//! Linguistic patterns over POS-tagged text.
//!
//! A pattern is a space separated list of token specs. Each token spec is a
//! `|` separated list of field specs matched against the `form|lemma|tag`
//! fields of a tagged token:
//!
//! - `#`: capture whatever the field holds
//! - `#text`: capture the field, which must match `text`
//! - empty: any non-space run, not captured
//! - `text`: a literal regex fragment (`.*` means any non-space run)
//!
//! # Example
//!
//! ```
//! use termex_pattern::parse;
//!
//! let pattern = parse("#|| |#|NN").unwrap().compile().unwrap();
//! let candidate = pattern.extract("data|datum|NNS lakes|lake|NN");
//! assert_eq!(candidate.as_deref(), Some("data lake"));
//! ```

#![warn(missing_docs)]

mod ast;
mod compile;
mod error;
mod parser;
mod tagged;

pub use ast::{FieldSpec, LinguisticPattern, TokenSpec};
pub use compile::{CompiledPattern, PatternSet};
pub use error::PatternError;
pub use parser::parse;
pub use tagged::{TaggedToken, surface_of};
