//! Line-list loading.
//!
//! Stop-words, exclusion regexps, seed terms, gold terms and patterns are all
//! stored one entry per line.

use std::{fs, path::Path};

use crate::ConfigError;

/// Reads a line list from disk.
///
/// Trailing whitespace is trimmed from every line and blank lines are skipped.
/// Leading whitespace is significant: a pattern may start with a wildcard token.
pub fn load_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_list(&contents))
}

/// Splits list contents into entries.
pub fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_parse_list_skips_blank_lines() {
        let entries = parse_list("the\n\n  \nof\r\nand  \n");
        assert_eq!(entries, vec!["the", "of", "and"]);
    }

    #[test]
    fn test_parse_list_keeps_leading_space() {
        let entries = parse_list(" |#|NN\n");
        assert_eq!(entries, vec![" |#|NN"]);
    }

    #[test]
    fn test_load_list_from_file() {
        let test_dir = TestDir::new();
        let path = test_dir.create_list("terms.txt", &["data lake", "big data"]);
        assert_eq!(load_list(&path).unwrap(), vec!["data lake", "big data"]);
    }

    #[test]
    fn test_load_missing_list_is_error() {
        let test_dir = TestDir::new();
        let result = load_list(&test_dir.path().join("missing.txt"));
        assert!(matches!(result, Err(ConfigError::ReadList { .. })));
    }
}
