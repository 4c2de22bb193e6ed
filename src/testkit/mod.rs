//! Testing infrastructure for misura.
//!
//! - **[`MemoryFileSystem`]**: in-memory [`FileSystem`](crate::io::FileSystem)
//!   so the full pipeline runs without touching disk
//! - **Test helpers**: parse, locate, and normalize inline Go source

pub mod helpers;
pub mod memory_fs;

pub use helpers::{locate_test_contract, normalize_test_contract, parse_test_code, ConfigBuilder};
pub use memory_fs::MemoryFileSystem;
