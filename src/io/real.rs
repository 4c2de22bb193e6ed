//! Production implementation of [`FileSystem`].

use crate::errors::{MisuraError, Result};
use crate::io::traits::FileSystem;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// File system backed by `std::fs`.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| MisuraError::io(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| MisuraError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| MisuraError::io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| MisuraError::io(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.misura.go");
        let fs = RealFileSystem::new();

        fs.write_atomic(&path, "first").unwrap();
        fs.write_atomic(&path, "second").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "second");
        // Only the target remains; the temporary file was renamed.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_if_exists() {
        let dir = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let path = dir.path().join("missing.go");

        assert_eq!(fs.read_if_exists(&path).unwrap(), None);
        std::fs::write(&path, "package a").unwrap();
        assert_eq!(fs.read_if_exists(&path).unwrap().as_deref(), Some("package a"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.go");
        let err = RealFileSystem::new().write_atomic(&path, "x").unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::IO);
    }
}
