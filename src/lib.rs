//! Generates metrics decorators for Go interfaces.
//!
//! Given a Go source file and a set of target interfaces, misura emits a
//! sibling file containing, for every target, a wrapper type that forwards
//! each call and reports call counts, successes, failures, and durations to
//! a hooks interface.

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod render;
pub mod synthesis;
pub mod testkit;

pub use crate::config::{GeneratorConfig, MetricFlags, MetricSet, SaltPolicy};
pub use crate::core::{ContractDefinition, GeneratedArtifact, MethodSignature, Parameter, Stage};
pub use crate::errors::{ErrorCode, MisuraError, Result};
pub use crate::pipeline::{GenerationReport, Generator, OutputStatus};
