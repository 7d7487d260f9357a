//! Configuration system for termex.
//!
//! termex uses TOML configuration files named `.termex.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.termex.toml` files found, then loading `~/.termex.toml` as the global config with lowest
//! precedence.
//!
//! List files (stop-words, exclusion regexps) named in a config are resolved relative to the
//! file that named them, and are read with [`load_list`].

#![warn(missing_docs)]

mod discovery;
mod error;
mod lists;
mod merge;
mod parse;
mod resolve;
mod validate;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use lists::{load_list, parse_list};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAssociationSettings, RawConfig, RawEvaluationSettings, RawFilterSettings,
    RawNgramSettings, RawNormalizeSettings, RawTsrSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_list_path;
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Largest n-gram order the association measures are defined for.
pub const MAX_ASSOCIATION_ORDER: usize = 4;

/// Top-level merged configuration for termex.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.termex.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// N-gram collection settings.
    pub ngrams: NgramSettings,
    /// Stop-word and exclusion settings, with list paths resolved.
    pub filter: FilterSettings,
    /// Candidate normalization settings.
    pub normalize: NormalizeSettings,
    /// Association scoring settings.
    pub association: AssociationSettings,
    /// Termhood propagation settings.
    pub tsr: TsrSettings,
    /// Evaluation settings.
    pub evaluation: EvaluationSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.termex.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.termex.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.termex.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - `n_min` greater than `n_max`
    /// - `n_max` above the largest order association measures support
    /// - List files that don't exist
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.termex.toml` file, with list paths
    /// shown in their resolved form.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            ngrams: self.ngrams.clone(),
            filter: self.filter.clone(),
            normalize: self.normalize.clone(),
            association: self.association.clone(),
            tsr: self.tsr.clone(),
            evaluation: self.evaluation.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// N-gram collection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NgramSettings {
    /// Smallest order collected (0 is treated as 1).
    pub n_min: usize,
    /// Largest order collected.
    pub n_max: usize,
    /// N-grams below this frequency are dropped.
    pub min_frequency: u64,
}

impl Default for NgramSettings {
    fn default() -> Self {
        Self {
            n_min: 1,
            n_max: 3,
            min_frequency: 2,
        }
    }
}

/// Stop-word and exclusion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Boundary stop-word list files.
    pub stopwords: Vec<PathBuf>,
    /// Inner stop-word list files.
    pub inner_stopwords: Vec<PathBuf>,
    /// Exclusion regexp list files.
    pub exclusion_regexps: Vec<PathBuf>,
    /// Language code for built-in stop-words. Empty disables them.
    pub language: String,
}

/// Candidate normalization settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Frequency tolerance, in percent, for nested-candidate pruning.
    pub nest_percent: f64,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self { nest_percent: 10.0 }
    }
}

/// Association scoring settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssociationSettings {
    /// Measure name.
    pub measure: String,
}

impl Default for AssociationSettings {
    fn default() -> Self {
        Self {
            measure: String::from("loglikelihood"),
        }
    }
}

/// Termhood propagation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TsrSettings {
    /// Admission policy name.
    pub policy: String,
    /// Iteration cap.
    pub max_iterations: u64,
}

impl Default for TsrSettings {
    fn default() -> Self {
        Self {
            policy: String::from("combined"),
            max_iterations: 10_000_000_000,
        }
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Number of randomized rankings to average.
    pub iterations: usize,
    /// Fall back to case-insensitive matching against the gold list.
    pub ignore_case: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            iterations: 1000,
            ignore_case: true,
        }
    }
}

/// Serializable view of the effective settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// N-gram settings.
    ngrams: NgramSettings,
    /// Filter settings.
    filter: FilterSettings,
    /// Normalization settings.
    normalize: NormalizeSettings,
    /// Association settings.
    association: AssociationSettings,
    /// TSR settings.
    tsr: TsrSettings,
    /// Evaluation settings.
    evaluation: EvaluationSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ngrams.n_min, 1);
        assert_eq!(config.ngrams.n_max, 3);
        assert_eq!(config.ngrams.min_frequency, 2);
        assert_eq!(config.normalize.nest_percent, 10.0);
        assert_eq!(config.association.measure, "loglikelihood");
        assert_eq!(config.tsr.policy, "combined");
        assert_eq!(config.tsr.max_iterations, 10_000_000_000);
        assert_eq!(config.evaluation.iterations, 1000);
        assert!(config.evaluation.ignore_case);
        assert!(config.filter.language.is_empty());
    }

    #[test]
    fn test_settings_to_toml_round_trips_sections() {
        let config = Config::default();
        let toml = config.settings_to_toml();
        assert!(toml.contains("[ngrams]"));
        assert!(toml.contains("n_max = 3"));
        assert!(toml.contains("[tsr]"));
        assert!(toml.contains("policy = \"combined\""));
        assert!(toml.contains("[evaluation]"));
    }
}
