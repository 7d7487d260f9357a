//! termex: terminology extraction from the command line.
//!
//! Each subcommand runs one pipeline stage. Tables produced by a stage are
//! stored as JSON in a state directory, so stages can be run one at a time and
//! re-run after changing settings.

#![warn(missing_docs)]

pub mod cli;
