//! I/O trait definitions for generation.
//!
//! The generator reads input files, checks for an earlier output, and
//! writes the new output through [`FileSystem`], so tests can run the whole
//! pipeline against an in-memory implementation.

use crate::errors::Result;
use std::path::Path;

/// File system operations the generator needs.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `MisuraError::Io` if the file is missing, unreadable, or not
    /// valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace `path` with `content` in one step.
    ///
    /// Readers observe either the previous file or the complete new one,
    /// never a partial write.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Contents of `path` if it exists.
    fn read_if_exists(&self, path: &Path) -> Result<Option<String>> {
        if self.exists(path) {
            self.read_to_string(path).map(Some)
        } else {
            Ok(None)
        }
    }
}
