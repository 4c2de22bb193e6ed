//! Generation pipeline.
//!
//! Per contract: `Located → Normalized → MetricsResolved → Rendered`; per
//! file: `Formatted → Written`. See [`Generator`].

pub mod generator;
pub mod report;

pub use generator::Generator;
pub use report::{ContractFailure, GenerationReport, OutputStatus};
