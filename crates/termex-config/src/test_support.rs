//! Temporary config trees and list files for termex-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory holding configs and line lists.
pub struct TestDir {
    /// Backing directory, removed on drop.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory, with parents.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a line list, one entry per line with a trailing newline.
    pub fn create_list(&self, rel_path: &str, entries: &[&str]) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut content = entries.join("\n");
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a comment-only config in `rel_path`.
    pub fn create_config(&self, rel_path: &str) -> PathBuf {
        write_config(&self.create_dir(rel_path), "# test config\n")
    }

    /// Writes a comment-only config at the root of the tree.
    pub fn create_config_at_root(&self) -> PathBuf {
        write_config(self.root.path(), "# root config\n")
    }

    /// Writes a config with `root = true` in `rel_path`, ending discovery there.
    pub fn create_root_config(&self, rel_path: &str) -> PathBuf {
        write_config(&self.create_dir(rel_path), "root = true\n")
    }
}

/// Writes `.termex.toml` with `content` into `dir`.
fn write_config(dir: &Path, content: &str) -> PathBuf {
    let config = dir.join(CONFIG_FILENAME);
    fs::write(&config, content).unwrap();
    config
}
