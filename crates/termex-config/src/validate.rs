//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::PathBuf};

use crate::{Config, MAX_ASSOCIATION_ORDER};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `n_min` exceeds `n_max`, so no n-grams will be collected.
    EmptyOrderRange {
        /// Configured minimum order.
        n_min: usize,
        /// Configured maximum order.
        n_max: usize,
    },
    /// `n_max` is larger than any order association measures can score.
    OrderBeyondAssociation {
        /// Configured maximum order.
        n_max: usize,
    },
    /// A list file does not exist.
    ListMissing {
        /// Setting that named the file.
        setting: &'static str,
        /// Path that doesn't exist.
        path: PathBuf,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOrderRange { n_min, n_max } => {
                write!(f, "n_min ({n_min}) is greater than n_max ({n_max})")
            }
            Self::OrderBeyondAssociation { n_max } => write!(
                f,
                "n_max ({n_max}) exceeds {MAX_ASSOCIATION_ORDER}; longer candidates cannot be scored"
            ),
            Self::ListMissing { setting, path } => {
                write!(f, "{setting} list does not exist: {}", path.display())
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let ngrams = &config.ngrams;
    if ngrams.n_min > ngrams.n_max {
        warnings.push(ConfigWarning::EmptyOrderRange {
            n_min: ngrams.n_min,
            n_max: ngrams.n_max,
        });
    }
    if ngrams.n_max > MAX_ASSOCIATION_ORDER {
        warnings.push(ConfigWarning::OrderBeyondAssociation {
            n_max: ngrams.n_max,
        });
    }

    let filter = &config.filter;
    let lists = [
        ("stopwords", &filter.stopwords),
        ("inner_stopwords", &filter.inner_stopwords),
        ("exclusion_regexps", &filter.exclusion_regexps),
    ];
    for (setting, paths) in lists {
        for path in paths {
            if !path.is_file() {
                warnings.push(ConfigWarning::ListMissing {
                    setting,
                    path: path.clone(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_order_range_warnings() {
        let mut config = Config::default();
        config.ngrams.n_min = 6;
        config.ngrams.n_max = 5;
        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::EmptyOrderRange { n_min: 6, n_max: 5 },
                ConfigWarning::OrderBeyondAssociation { n_max: 5 },
            ]
        );
    }

    #[test]
    fn test_missing_list_warning() {
        let test_dir = TestDir::new();
        let present = test_dir.create_list("stop.txt", &["the"]);
        let missing = test_dir.path().join("inner.txt");

        let mut config = Config::default();
        config.filter.stopwords = vec![present];
        config.filter.inner_stopwords = vec![missing.clone()];

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::ListMissing {
                setting: "inner_stopwords",
                path: missing,
            }]
        );
        assert!(warnings[0].to_string().contains("inner_stopwords"));
    }
}
