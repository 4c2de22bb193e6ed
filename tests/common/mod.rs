// Shared helpers for misura integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use misura::io::RealFileSystem;
use misura::render::{NoopFormatter, TemplateRegistry};
use misura::{GenerationReport, Generator, GeneratorConfig, Result};
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy a fixture into a fresh temporary directory.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let target = dir.path().join(name);
    fs::copy(fixture_path(name), &target).expect("Failed to copy fixture");
    (dir, target)
}

/// Run the generator on `input` without an external formatter.
pub fn generate(config: &GeneratorConfig, input: &Path) -> Result<GenerationReport> {
    let registry = TemplateRegistry::builtin()?;
    Generator::new(config, &registry, &NoopFormatter, &RealFileSystem::new()).generate_file(input)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
