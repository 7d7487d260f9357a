//! Shared context for running CLI commands.
//!
//! The command line always tokenizes on whitespace. Language-specific
//! tokenizers are registered through the `termex_extract::Tokenizers` library
//! API; the registry here is only looked up by the configured language.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use serde::{Serialize, de::DeserializeOwned};
use termex_config::{Config, NgramSettings, load_list};
use termex_extract::{StopwordSets, Stopwords, Tokenizer, Tokenizers};

use super::{args::OrderArgs, store::Store};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Table store in the state directory.
    pub store: Store,
    /// Tokenizers by language; whitespace splitting when none is registered.
    tokenizers: Tokenizers,
}

impl CommandContext {
    /// Loads the current directory, configuration, and state directory.
    pub fn load(state: PathBuf) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        let state_dir = if state.is_absolute() {
            state
        } else {
            cwd.join(state)
        };
        Ok(Self {
            cwd,
            config,
            store: Store::new(state_dir),
            tokenizers: Tokenizers::new(),
        })
    }

    /// Returns the tokenizer for the configured language.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizers.get(&self.config.filter.language)
    }

    /// Returns n-gram settings with CLI overrides applied.
    pub fn ngram_settings(&self, overrides: &OrderArgs) -> NgramSettings {
        let defaults = self.config.ngrams;
        NgramSettings {
            n_min: overrides.n_min.unwrap_or(defaults.n_min),
            n_max: overrides.n_max.unwrap_or(defaults.n_max),
            min_frequency: defaults.min_frequency,
        }
    }

    /// Builds boundary and inner stop-word sets from the configuration.
    ///
    /// Boundary words come from the configured language and the `stopwords`
    /// lists; inner words from the `inner_stopwords` lists.
    pub fn stopword_sets(&self) -> Result<StopwordSets, ExitCode> {
        let filter = &self.config.filter;
        let mut boundary = if filter.language.is_empty() {
            Stopwords::new()
        } else if let Some(words) = Stopwords::for_language(&filter.language) {
            words
        } else {
            log::warn!(
                "no built-in stop-words for language '{}'",
                filter.language
            );
            Stopwords::new()
        };
        for path in &filter.stopwords {
            boundary.extend(read_list(path)?);
        }

        let mut inner = Stopwords::new();
        for path in &filter.inner_stopwords {
            inner.extend(read_list(path)?);
        }

        log::info!(
            "{} boundary and {} inner stop-words",
            boundary.len(),
            inner.len()
        );
        Ok(StopwordSets { boundary, inner })
    }

    /// Reads a stored table, exiting with a consistent error on failure.
    pub fn load_table<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, ExitCode> {
        self.store.load(name).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Stores a table, exiting with a consistent error on failure.
    pub fn save_table<T: Serialize>(&self, name: &str, value: &T) -> Result<(), ExitCode> {
        self.store.save(name, value).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Reads a line list, exiting with a consistent error on failure.
pub fn read_list(path: &Path) -> Result<Vec<String>, ExitCode> {
    load_list(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
