//! Salt values that keep generated temporaries stable across runs.
//!
//! Each decorator section is preceded by a marker line
//! `// RANDOM_HEX(<Contract>)=<HEX>`. When an earlier output file carries a
//! marker for the same contract its salt is reused; otherwise the configured
//! [`SaltPolicy`] supplies a new one.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

use crate::config::SaltPolicy;

const MARKER_PREFIX: &str = "// RANDOM_HEX(";
const MAX_SALT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Salt(String);

impl Salt {
    /// Accepts 1 to 16 uppercase hex digits.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let valid = !text.is_empty()
            && text.len() <= MAX_SALT_LEN
            && text
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c));
        valid.then(|| Salt(text.to_string()))
    }

    /// First four bytes of SHA-256 over the input path and contract name.
    pub fn derived(path: &Path, contract: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(contract.as_bytes());
        let digest = hasher.finalize();
        Salt(digest[..4].iter().map(|b| format!("{:02X}", b)).collect())
    }

    pub fn random() -> Self {
        Salt(format!("{:08X}", rand::random::<u32>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a resolved salt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltSource {
    Reused,
    Derived,
    Random,
}

pub fn salt_marker(contract: &str, salt: &Salt) -> String {
    format!("{}{})={}", MARKER_PREFIX, contract, salt)
}

/// Salt recorded for `contract` anywhere in an earlier output.
pub fn find_salt(previous_output: &str, contract: &str) -> Option<Salt> {
    let prefix = format!("{}{})=", MARKER_PREFIX, contract);
    previous_output
        .lines()
        .find_map(|line| line.trim().strip_prefix(&prefix).and_then(Salt::parse))
}

pub fn resolve_salt(
    policy: SaltPolicy,
    previous_output: Option<&str>,
    path: &Path,
    contract: &str,
) -> (Salt, SaltSource) {
    if let Some(salt) = previous_output.and_then(|text| find_salt(text, contract)) {
        return (salt, SaltSource::Reused);
    }

    match policy {
        SaltPolicy::Derived => (Salt::derived(path, contract), SaltSource::Derived),
        SaltPolicy::Random => (Salt::random(), SaltSource::Random),
    }
}
