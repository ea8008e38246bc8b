//! Scratch directory trees for folio-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree that config files are written into.
pub struct TestDir {
    /// Owns the tree; dropping it removes everything.
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

    /// Creates `rel` and its parents, returning the full path.
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `contents` to `rel/.folio.toml`, returning the file's path.
    pub fn write_config(&self, rel: &str, contents: &str) -> PathBuf {
        let file = self.create_dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, contents).unwrap();
        file
    }
}
