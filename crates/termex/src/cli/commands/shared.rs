//! Shared helpers for command implementations.

use std::{fmt::Display, fs, path::Path, process::ExitCode, str::FromStr};

/// Reads a whole text file, exiting with a consistent error on failure.
pub fn read_text(path: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Parses a configured name, exiting with a consistent error on failure.
///
/// Used for settings that are plain strings in the configuration, such as the
/// association measure and the TSR policy.
pub fn parse_setting<T>(value: &str) -> Result<T, ExitCode>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Formats a count with a singular or plural noun.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
