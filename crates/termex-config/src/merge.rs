//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving list paths.

use std::path::{Path, PathBuf};

use crate::{
    AssociationSettings, Config, ConfigError, EvaluationSettings, FilterSettings, NgramSettings,
    NormalizeSettings, TsrSettings,
    parse::RawConfig,
    resolve::resolve_list_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory that relative list paths in this file resolve against.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - List paths: the whole list from the highest-precedence file that sets it wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut config = Config {
        config_root: configs.first().map(|c| c.dir().to_path_buf()),
        ..Config::default()
    };

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        apply_ngrams(&mut config.ngrams, parsed);
        apply_filter(&mut config.filter, parsed)?;
        apply_normalize(&mut config.normalize, parsed);
        apply_association(&mut config.association, parsed);
        apply_tsr(&mut config.tsr, parsed);
        apply_evaluation(&mut config.evaluation, parsed);
    }

    Ok(config)
}

/// Applies raw n-gram settings, overwriting any present values.
fn apply_ngrams(result: &mut NgramSettings, parsed: &ParsedConfig) {
    let Some(raw) = &parsed.config.ngrams else {
        return;
    };
    if let Some(v) = raw.n_min {
        result.n_min = v;
    }
    if let Some(v) = raw.n_max {
        result.n_max = v;
    }
    if let Some(v) = raw.min_frequency {
        result.min_frequency = v;
    }
}

/// Applies raw filter settings, resolving list paths against the defining file.
fn apply_filter(result: &mut FilterSettings, parsed: &ParsedConfig) -> Result<(), ConfigError> {
    let Some(raw) = &parsed.config.filter else {
        return Ok(());
    };
    let dir = parsed.dir();
    if let Some(paths) = &raw.stopwords {
        result.stopwords = resolve_all(paths, dir)?;
    }
    if let Some(paths) = &raw.inner_stopwords {
        result.inner_stopwords = resolve_all(paths, dir)?;
    }
    if let Some(paths) = &raw.exclusion_regexps {
        result.exclusion_regexps = resolve_all(paths, dir)?;
    }
    if let Some(language) = &raw.language {
        result.language.clone_from(language);
    }
    Ok(())
}

/// Resolves every path in a list.
fn resolve_all(paths: &[String], dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    paths.iter().map(|p| resolve_list_path(p, dir)).collect()
}

/// Applies raw normalization settings.
fn apply_normalize(result: &mut NormalizeSettings, parsed: &ParsedConfig) {
    if let Some(raw) = &parsed.config.normalize
        && let Some(v) = raw.nest_percent
    {
        result.nest_percent = v;
    }
}

/// Applies raw association settings.
fn apply_association(result: &mut AssociationSettings, parsed: &ParsedConfig) {
    if let Some(raw) = &parsed.config.association
        && let Some(v) = &raw.measure
    {
        result.measure.clone_from(v);
    }
}

/// Applies raw TSR settings.
fn apply_tsr(result: &mut TsrSettings, parsed: &ParsedConfig) {
    let Some(raw) = &parsed.config.tsr else {
        return;
    };
    if let Some(v) = &raw.policy {
        result.policy.clone_from(v);
    }
    if let Some(v) = raw.max_iterations {
        result.max_iterations = v;
    }
}

/// Applies raw evaluation settings.
fn apply_evaluation(result: &mut EvaluationSettings, parsed: &ParsedConfig) {
    let Some(raw) = &parsed.config.evaluation else {
        return;
    };
    if let Some(v) = raw.iterations {
        result.iterations = v;
    }
    if let Some(v) = raw.ignore_case {
        result.ignore_case = v;
    }
}
