//! Outcome of one generation run.

use std::fmt;
use std::path::PathBuf;

use crate::errors::MisuraError;

/// A contract that was dropped from the output and why.
#[derive(Debug)]
pub struct ContractFailure {
    pub contract: String,
    pub error: MisuraError,
}

impl fmt::Display for ContractFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.contract, self.error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// New content was written
    Written,
    /// Existing output already matched
    Unchanged,
    /// No contract succeeded, so nothing was written
    Skipped,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub status: OutputStatus,
    /// Contracts present in the output, in source order
    pub generated: Vec<String>,
    pub failures: Vec<ContractFailure>,
    /// Requested targets with no matching declaration
    pub unmatched: Vec<String>,
}

impl GenerationReport {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            status: OutputStatus::Skipped,
            generated: Vec::new(),
            failures: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    pub fn fail(&mut self, contract: impl Into<String>, error: MisuraError) {
        self.failures.push(ContractFailure {
            contract: contract.into(),
            error,
        });
    }

    /// True when at least one contract was generated and none failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.generated.is_empty()
    }
}
