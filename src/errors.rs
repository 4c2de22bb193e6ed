//! Error types for decorator generation.
//!
//! Every stage boundary (locate, normalize, select, render, format, write)
//! returns [`Result`]; nothing is retried. Each variant carries enough context
//! (file path, contract name, stage) to diagnose a failure without a backtrace.
//!
//! # Error Codes
//!
//! - E001-E009: I/O errors
//! - E010-E019: Parse and declaration-shape errors
//! - E020-E029: Configuration errors
//! - E030-E039: Rendering and formatting errors

use crate::core::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error reading or writing a file
    pub const IO: ErrorCode = ErrorCode("E001");
    /// Input text is not well-formed
    pub const PARSE_SYNTAX: ErrorCode = ErrorCode("E010");
    /// Declaration shape cannot be wrapped
    pub const PARSE_UNSUPPORTED: ErrorCode = ErrorCode("E011");
    /// No package clause precedes the contract
    pub const PARSE_MISSING_PACKAGE: ErrorCode = ErrorCode("E012");
    /// Configuration value is invalid
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Template failed to register or render
    pub const TEMPLATE: ErrorCode = ErrorCode("E030");
    /// External formatter failed
    pub const FORMAT: ErrorCode = ErrorCode("E031");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for misura operations
#[derive(Debug, Error)]
pub enum MisuraError {
    /// Malformed input text
    #[error("Parse error in {path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Target resolves to something that is not a plain method set
    #[error("Unsupported declaration '{contract}' in {path}: {message}")]
    UnsupportedConstruct {
        path: PathBuf,
        contract: String,
        message: String,
    },

    /// Contract seen before any package clause
    #[error("No package clause found before contract '{contract}' in {path}")]
    MissingPackageName { path: PathBuf, contract: String },

    /// File system related errors
    #[error("I/O error on {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Template registration or render failure
    #[error("Template error in {context}: {message}")]
    Template { context: String, message: String },

    /// External formatter failure
    #[error("Formatting {path} failed: {message}")]
    Format { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised inside a contract's pipeline, tagged with the stage reached
    #[error("[{stage}] {source}")]
    AtStage {
        stage: Stage,
        #[source]
        source: Box<MisuraError>,
    },
}

impl MisuraError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a parse error with location
    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn unsupported(
        path: impl Into<PathBuf>,
        contract: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConstruct {
            path: path.into(),
            contract: contract.into(),
            message: message.into(),
        }
    }

    /// `context` names the template or contract being rendered.
    pub fn template(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Tag the error with the stage it surfaced in.
    pub fn at_stage(self, stage: Stage) -> Self {
        match self {
            already @ Self::AtStage { .. } => already,
            other => Self::AtStage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage recorded by [`MisuraError::at_stage`], if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::AtStage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Error with any stage tag removed.
    pub fn root(&self) -> &MisuraError {
        match self {
            Self::AtStage { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.root() {
            Self::Parse { .. } => ErrorCode::PARSE_SYNTAX,
            Self::UnsupportedConstruct { .. } => ErrorCode::PARSE_UNSUPPORTED,
            Self::MissingPackageName { .. } => ErrorCode::PARSE_MISSING_PACKAGE,
            Self::Io { .. } => ErrorCode::IO,
            Self::Template { .. } => ErrorCode::TEMPLATE,
            Self::Format { .. } => ErrorCode::FORMAT,
            Self::Config(_) | Self::AtStage { .. } => ErrorCode::CONFIG_INVALID,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, MisuraError>;

/// Extension trait for tagging results with a pipeline stage
pub trait ResultExt<T> {
    fn at_stage(self, stage: Stage) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn at_stage(self, stage: Stage) -> Result<T> {
        self.map_err(|e| e.at_stage(stage))
    }
}
