//! JSON table store backing the pipeline stages.
//!
//! Every stage reads the tables it needs from the state directory and writes
//! its result back. Writes go through a temporary file in the same directory
//! that is persisted over the target, so a failed stage never leaves a
//! half-written table behind.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Stored plain corpus.
pub const CORPUS: &str = "corpus";
/// Stored tagged corpus.
pub const TAGGED_CORPUS: &str = "tagged_corpus";
/// Stored n-gram and token counts.
pub const NGRAMS: &str = "ngrams";
/// Stored tagged n-gram counts.
pub const TAGGED_NGRAMS: &str = "tagged_ngrams";
/// Stored candidate table.
pub const CANDIDATES: &str = "candidates";

/// Errors raised while reading or writing stored tables.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The table has not been produced yet.
    #[error("no stored {name} table in {dir}; run `termex {hint}` first")]
    Missing {
        /// Table name.
        name: &'static str,
        /// State directory.
        dir: PathBuf,
        /// Subcommand that produces the table.
        hint: &'static str,
    },

    /// Filesystem error.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The stored JSON could not be read or written.
    #[error("invalid table {path}: {source}")]
    Json {
        /// Table path.
        path: PathBuf,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

/// Table store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct Store {
    /// State directory.
    dir: PathBuf,
}

impl Store {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the state directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing a table.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Returns true if the table has been stored.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Reads a table.
    pub fn load<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, StoreError> {
        let path = self.path(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::Missing {
                    name,
                    dir: self.dir.clone(),
                    hint: producer_of(name),
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Writes a table atomically, replacing any previous version.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| self.io_error(source))?;
        let path = self.path(name);

        let temp_file = NamedTempFile::new_in(&self.dir).map_err(|source| self.io_error(source))?;
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        drop(writer);

        temp_file.persist(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        log::debug!("stored {}", path.display());
        Ok(())
    }

    /// Wraps an I/O error on the state directory.
    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.dir.clone(),
            source,
        }
    }
}

/// Subcommand that produces a table.
fn producer_of(name: &str) -> &'static str {
    match name {
        CORPUS | NGRAMS => "ngrams <corpus>",
        TAGGED_CORPUS | TAGGED_NGRAMS => "ngrams --tagged <corpus>",
        _ => "extract",
    }
}
