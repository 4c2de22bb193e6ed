//! Per-contract generation stages.
//!
//! A contract moves through `Located → Normalized → MetricsResolved →
//! Rendered → Formatted → Written`. Any failure leaves it `Failed` at the
//! stage it was in; errors record that stage so diagnostics can say where
//! generation stopped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and parsing the input file
    Parsing,
    /// Contract declaration found in the syntax tree
    Located,
    /// Parameters and results canonicalized
    Normalized,
    /// Metric flags resolved from configuration
    MetricsResolved,
    /// Decorator text produced from the template
    Rendered,
    /// External formatting pass applied
    Formatted,
    /// Output persisted
    Written,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsing => write!(f, "parsing"),
            Self::Located => write!(f, "located"),
            Self::Normalized => write!(f, "normalized"),
            Self::MetricsResolved => write!(f, "metrics_resolved"),
            Self::Rendered => write!(f, "rendered"),
            Self::Formatted => write!(f, "formatted"),
            Self::Written => write!(f, "written"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::MetricsResolved.to_string(), "metrics_resolved");
        assert_eq!(Stage::Written.to_string(), "written");
    }
}
