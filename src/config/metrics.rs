//! Instrumentation category selection.
//!
//! Categories are configured as tokens drawn from
//! `all`, `duration`, `total`, `success`, `error`. Tokens are case-sensitive;
//! unknown tokens are kept in the set but never enable anything.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALL: &str = "all";
pub const DURATION: &str = "duration";
pub const TOTAL: &str = "total";
pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";

/// Deduplicated, ordered set of configured metric tokens.
///
/// Inserting `all` (alone or inside a comma-delimited value) collapses the
/// set to just `all`; once `all` is present, later inserts are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MetricSet(Vec<String>);

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one flag value, which may itself be comma-delimited.
    pub fn insert(&mut self, value: &str) {
        if self.contains(ALL) {
            return;
        }

        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token == ALL {
                self.0 = vec![ALL.to_string()];
                return;
            }
            if !self.contains(token) {
                self.0.push(token.to_string());
            }
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Compute the four instrumentation flags.
    pub fn resolve(&self) -> MetricFlags {
        if self.is_empty() || self.contains(ALL) {
            return MetricFlags::all();
        }

        MetricFlags {
            total: self.contains(TOTAL),
            success: self.contains(SUCCESS),
            error: self.contains(ERROR),
            duration: self.contains(DURATION),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for MetricSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = MetricSet::new();
        for value in iter {
            set.insert(value.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for MetricSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<MetricSet> for Vec<String> {
    fn from(set: MetricSet) -> Self {
        set.0
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Resolved instrumentation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricFlags {
    pub total: bool,
    pub success: bool,
    pub error: bool,
    pub duration: bool,
}

impl MetricFlags {
    pub const fn all() -> Self {
        Self {
            total: true,
            success: true,
            error: true,
            duration: true,
        }
    }
}

impl Default for MetricFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Resolve flags straight from raw configuration tokens.
pub fn select_metrics<S: AsRef<str>>(tokens: &[S]) -> MetricFlags {
    tokens.iter().collect::<MetricSet>().resolve()
}
