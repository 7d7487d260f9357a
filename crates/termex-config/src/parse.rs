//! Configuration file parsing.
//!
//! Parses individual `.termex.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// N-gram collection section.
    pub ngrams: Option<RawNgramSettings>,
    /// Stop-word and exclusion filter section.
    pub filter: Option<RawFilterSettings>,
    /// Candidate normalization section.
    pub normalize: Option<RawNormalizeSettings>,
    /// Association scoring section.
    pub association: Option<RawAssociationSettings>,
    /// Termhood propagation section.
    pub tsr: Option<RawTsrSettings>,
    /// Evaluation section.
    pub evaluation: Option<RawEvaluationSettings>,
}

/// Raw n-gram settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNgramSettings {
    /// Smallest n-gram order to collect.
    pub n_min: Option<usize>,
    /// Largest n-gram order to collect.
    pub n_max: Option<usize>,
    /// Minimum frequency for an n-gram to be kept.
    pub min_frequency: Option<u64>,
}

/// Raw filter settings.
///
/// List paths accept either a single string or an array of strings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFilterSettings {
    /// Boundary stop-word list files.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub stopwords: Option<Vec<String>>,
    /// Inner stop-word list files.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub inner_stopwords: Option<Vec<String>>,
    /// Exclusion regular expression list files.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclusion_regexps: Option<Vec<String>>,
    /// Language code for built-in stop-words ("" disables them).
    pub language: Option<String>,
}

/// Raw normalization settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNormalizeSettings {
    /// Frequency tolerance, in percent, for nested-candidate pruning.
    pub nest_percent: Option<f64>,
}

/// Raw association settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAssociationSettings {
    /// Association measure name.
    pub measure: Option<String>,
}

/// Raw TSR settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTsrSettings {
    /// Admission policy name.
    pub policy: Option<String>,
    /// Iteration cap.
    pub max_iterations: Option<u64>,
}

/// Raw evaluation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEvaluationSettings {
    /// Number of randomized rankings to average.
    pub iterations: Option<usize>,
    /// Fall back to case-insensitive matching against the gold list.
    pub ignore_case: Option<bool>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks whether a config file sets `root = true`.
///
/// Unreadable or unparsable files are treated as non-root; the error surfaces
/// later when the file is loaded.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
