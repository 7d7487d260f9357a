//! Path resolution for list files.
//!
//! Resolves relative and tilde-prefixed list paths to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a list file path against the directory of the config that named it.
///
/// Handles three cases:
/// - Tilde paths (`~/lists/stop.txt`) - expanded to home directory
/// - Relative paths (`stop.txt`, `../shared/stop.txt`) - joined onto `config_dir`
/// - Absolute paths - returned as-is
///
/// The file is not required to exist; `Config::validate` reports missing lists.
pub fn resolve_list_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_resolve_relative_path() {
        let test_dir = TestDir::new();
        let resolved = resolve_list_path("lists/stop.txt", test_dir.path()).unwrap();
        assert_eq!(resolved, test_dir.path().join("lists/stop.txt"));
    }

    #[test]
    fn test_resolve_absolute_path_unchanged() {
        let test_dir = TestDir::new();
        let file = test_dir.create_list("stop.txt", &["the"]);
        let resolved = resolve_list_path(file.to_str().unwrap(), Path::new("/elsewhere")).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn test_resolve_tilde_path() {
        let Some(dirs) = BaseDirs::new() else {
            return;
        };
        let resolved = resolve_list_path("~/stop.txt", Path::new("/ignored")).unwrap();
        assert_eq!(resolved, dirs.home_dir().join("stop.txt"));
    }
}
