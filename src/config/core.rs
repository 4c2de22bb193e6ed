use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::metrics::MetricSet;
use crate::errors::{MisuraError, Result};

/// Default suffix inserted before the output file's extension.
pub const DEFAULT_SUFFIX: &str = "misura";

/// Environment variable `go generate` sets to the file being processed.
pub const FILE_ENV_VAR: &str = "GOFILE";

/// How a decorator's salt is chosen when no earlier one can be reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SaltPolicy {
    /// Hash of the input path and contract name
    #[default]
    Derived,
    /// Fresh random value
    Random,
}

/// Contents of a `.misura.toml` file. Every field is optional; absent fields
/// leave the built-in default in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MisuraConfig {
    #[serde(default)]
    pub targets: Option<Vec<String>>,

    #[serde(default)]
    pub metrics: Option<MetricSet>,

    #[serde(default)]
    pub format_on_write: Option<bool>,

    #[serde(default)]
    pub suffix: Option<String>,

    /// Custom decorator template
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default)]
    pub salt_policy: Option<SaltPolicy>,
}

/// Fully resolved generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Contracts to wrap, unioned later with directive comments
    pub targets: Vec<String>,
    pub metrics: MetricSet,
    pub format_on_write: bool,
    pub file_path: Option<PathBuf>,
    pub suffix: String,
    pub template_path: Option<PathBuf>,
    pub salt_policy: SaltPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            metrics: MetricSet::new(),
            format_on_write: true,
            file_path: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            template_path: None,
            salt_policy: SaltPolicy::Derived,
        }
    }
}

impl GeneratorConfig {
    /// Layer values from a config file over the current settings.
    pub fn merge_file(mut self, file: &MisuraConfig) -> Self {
        if let Some(targets) = &file.targets {
            add_targets(&mut self.targets, targets);
        }
        if let Some(metrics) = &file.metrics {
            self.metrics = metrics.clone();
        }
        if let Some(format_on_write) = file.format_on_write {
            self.format_on_write = format_on_write;
        }
        if let Some(suffix) = &file.suffix {
            self.suffix = suffix.clone();
        }
        if let Some(template) = &file.template {
            self.template_path = Some(template.clone());
        }
        if let Some(policy) = file.salt_policy {
            self.salt_policy = policy;
        }
        self
    }

    /// Add repeatable or comma-delimited target names.
    pub fn with_targets<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        add_targets(&mut self.targets, values);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let suffix = self.suffix.trim();
        if suffix.is_empty() {
            return Err(MisuraError::Config("suffix must not be empty".into()));
        }
        if suffix.contains(['/', '\\']) {
            return Err(MisuraError::Config(format!(
                "suffix '{}' must not contain path separators",
                suffix
            )));
        }
        if let Some(bad) = self.targets.iter().find(|t| !is_identifier(t)) {
            return Err(MisuraError::Config(format!(
                "target '{}' is not a valid identifier",
                bad
            )));
        }
        Ok(())
    }
}

fn add_targets<S: AsRef<str>>(targets: &mut Vec<String>, values: &[S]) {
    for value in values {
        for name in value.as_ref().split(',').map(str::trim) {
            if !name.is_empty() && !targets.iter().any(|t| t == name) {
                targets.push(name.to_string());
            }
        }
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
