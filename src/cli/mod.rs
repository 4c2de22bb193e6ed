//! CLI module for misura
//!
//! - Argument parsing and config merging (`args`)
//! - Logging setup (`setup`)
//! - Run summary (`output`)

pub mod args;
pub mod output;
pub mod setup;

pub use args::Cli;
pub use output::format_report;
pub use setup::{default_log_level, init_logging};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
