//! Factory functions for generator tests.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`parse_test_code`] | Parse Go source into a [`GoAst`] |
//! | [`locate_test_contract`] | Parse and locate one interface |
//! | [`normalize_test_contract`] | Parse, locate, and normalize one interface |
//! | [`ConfigBuilder`] | Build generator configurations fluently |
//!
//! ```rust,ignore
//! use misura::testkit::helpers::{normalize_test_contract, ConfigBuilder};
//!
//! let contract = normalize_test_contract("package a\ntype A interface { F() error }", "A");
//! let config = ConfigBuilder::new().target("A").format(false).build();
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::analyzers::go::{parse_source, ContractLocator, GoAst, RawContract};
use crate::config::{GeneratorConfig, MetricSet, SaltPolicy};
use crate::core::ContractDefinition;
use crate::synthesis::SignatureNormalizer;

const TEST_PATH: &str = "test.go";

/// Parse inline Go code, panicking with the parse error on failure.
pub fn parse_test_code(source: &str) -> GoAst {
    parse_source(source, Path::new(TEST_PATH))
        .unwrap_or_else(|e| panic!("Failed to parse test code: {}", e))
}

/// Locate the interface `name`, panicking if it fails or is absent.
pub fn locate_test_contract(source: &str, name: &str) -> RawContract {
    let ast = parse_test_code(source);
    let targets: BTreeSet<String> = [name.to_string()].into_iter().collect();
    let mut outcome = ContractLocator::new(&targets)
        .locate(&ast)
        .unwrap_or_else(|e| panic!("Failed to locate {}: {}", name, e));
    if let Some((_, error)) = outcome.failures.pop() {
        panic!("Failed to locate {}: {}", name, error);
    }
    outcome
        .contracts
        .pop()
        .unwrap_or_else(|| panic!("Contract {} not found", name))
}

/// Locate and normalize the interface `name`.
pub fn normalize_test_contract(source: &str, name: &str) -> ContractDefinition {
    let ast = parse_test_code(source);
    let targets: BTreeSet<String> = [name.to_string()].into_iter().collect();
    let outcome = ContractLocator::new(&targets)
        .locate(&ast)
        .unwrap_or_else(|e| panic!("Failed to locate {}: {}", name, e));
    let raw = outcome
        .contracts
        .first()
        .unwrap_or_else(|| panic!("Contract {} not found", name));
    SignatureNormalizer::default()
        .normalize_contract(
            raw,
            outcome.package_name.as_deref().unwrap_or_default(),
            &outcome.imports,
            Path::new(TEST_PATH),
        )
        .unwrap_or_else(|e| panic!("Failed to normalize {}: {}", name, e))
}

/// Builder for [`GeneratorConfig`] with formatting off by default.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: GeneratorConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig {
                format_on_write: false,
                ..GeneratorConfig::default()
            },
        }
    }

    pub fn target(mut self, name: &str) -> Self {
        self.config = self.config.with_targets(&[name]);
        self
    }

    pub fn metrics(mut self, tokens: &[&str]) -> Self {
        self.config.metrics = tokens.iter().collect::<MetricSet>();
        self
    }

    pub fn format(mut self, enabled: bool) -> Self {
        self.config.format_on_write = enabled;
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.config.suffix = suffix.to_string();
        self
    }

    pub fn salt_policy(mut self, policy: SaltPolicy) -> Self {
        self.config.salt_policy = policy;
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file_path = Some(path.into());
        self
    }

    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
