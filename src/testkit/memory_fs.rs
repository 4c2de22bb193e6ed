//! In-memory [`FileSystem`] for pipeline tests.
//!
//! The internal state uses `Arc<RwLock<_>>`; clones share the same files so a
//! test can hand one clone to the generator and inspect another.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::errors::{MisuraError, Result};
use crate::io::FileSystem;

#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    ///
    /// ```rust,ignore
    /// let fs = MemoryFileSystem::new().with_file("store.go", "package store");
    /// ```
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .expect("Lock poisoned")
            .insert(path.into(), content.into());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .read()
            .expect("Lock poisoned")
            .get(path.as_ref())
            .cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .expect("Lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Number of completed `write_atomic` calls.
    pub fn write_count(&self) -> usize {
        *self.writes.read().expect("Lock poisoned")
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| {
            MisuraError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            )
        })
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .write()
            .expect("Lock poisoned")
            .insert(path.to_path_buf(), content.to_string());
        *self.writes.write().expect("Lock poisoned") += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().expect("Lock poisoned").contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let fs = MemoryFileSystem::new().with_file("a.go", "package a");
        let other = fs.clone();
        other.write_atomic(Path::new("b.go"), "package b").unwrap();

        assert_eq!(fs.contents("b.go").as_deref(), Some("package b"));
        assert_eq!(fs.write_count(), 1);
        assert_eq!(fs.paths().len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MemoryFileSystem::new()
            .read_to_string(Path::new("nope.go"))
            .unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::IO);
    }
}
