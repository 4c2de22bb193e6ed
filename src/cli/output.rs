//! Terminal summary of a generation run.

use colored::Colorize;
use std::fmt::Write;

use crate::pipeline::{GenerationReport, OutputStatus};

/// Human-readable summary, one line per event.
pub fn format_report(report: &GenerationReport) -> String {
    let mut out = String::new();
    let path = report.output_path.display();

    match report.status {
        OutputStatus::Written => {
            let _ = writeln!(
                out,
                "{} {} ({})",
                "wrote".green().bold(),
                path,
                report.generated.join(", ")
            );
        }
        OutputStatus::Unchanged => {
            let _ = writeln!(out, "{} {}", "unchanged".cyan(), path);
        }
        OutputStatus::Skipped => {
            let _ = writeln!(out, "{} {}", "skipped".yellow(), path);
        }
    }

    for name in &report.unmatched {
        let _ = writeln!(out, "{} target '{}' not found", "warning:".yellow().bold(), name);
    }
    for failure in &report.failures {
        let _ = writeln!(out, "{} {}", "error:".red().bold(), failure);
    }
    out
}
