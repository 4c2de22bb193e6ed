use clap::Parser;
use std::path::PathBuf;

use crate::config::{GeneratorConfig, MisuraConfig, SaltPolicy};

#[derive(Parser, Debug)]
#[command(name = "misura")]
#[command(about = "Generates metrics decorators for Go interfaces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Interfaces to wrap (repeatable, comma-separated)
    #[arg(short = 't', long = "target", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Metrics to collect: all, total, success, error, duration
    #[arg(short = 'm', long = "metrics", value_delimiter = ',')]
    pub metrics: Vec<String>,

    /// Run goimports (or gofmt) on the output
    #[arg(
        long = "fmt",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub format: Option<bool>,

    /// Go file to process; `go generate` provides it through $GOFILE
    #[arg(short = 'f', long = "file", env = "GOFILE")]
    pub file: Option<PathBuf>,

    /// Suffix inserted before the output's extension
    #[arg(long)]
    pub suffix: Option<String>,

    /// Handlebars template replacing the built-in decorator
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// How new salts are chosen
    #[arg(long = "salt-policy", value_enum)]
    pub salt_policy: Option<SaltPolicy>,

    /// Config file to use instead of searching for .misura.toml
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated)
    ///
    /// Long form only; `-v` stays unbound since comparable generators use it
    /// for the version.
    #[arg(long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Defaults, then the config file, then these flags.
    pub fn to_config(&self, file: &MisuraConfig) -> GeneratorConfig {
        let mut config = GeneratorConfig::default()
            .merge_file(file)
            .with_targets(&self.targets);

        if !self.metrics.is_empty() {
            config.metrics = self.metrics.iter().collect();
        }
        if let Some(format) = self.format {
            config.format_on_write = format;
        }
        if let Some(file) = &self.file {
            config.file_path = Some(file.clone());
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if let Some(template) = &self.template {
            config.template_path = Some(template.clone());
        }
        if let Some(policy) = self.salt_policy {
            config.salt_policy = policy;
        }
        config
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricSet;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("misura").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_targets_and_metrics_accept_commas_and_repeats() {
        let cli = parse(&["-t", "Store,Cache", "-t", "Queue", "-m", "total,duration", "-m", "total"]);
        assert_eq!(cli.targets, vec!["Store", "Cache", "Queue"]);

        let config = cli.to_config(&MisuraConfig::default());
        assert_eq!(config.targets, vec!["Store", "Cache", "Queue"]);
        assert_eq!(config.metrics.tokens(), ["total", "duration"]);
    }

    #[test]
    fn test_fmt_flag_forms() {
        assert_eq!(parse(&[]).format, None);
        assert_eq!(parse(&["--fmt"]).format, Some(true));
        assert_eq!(parse(&["--fmt=false"]).format, Some(false));
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = MisuraConfig {
            targets: Some(vec!["Store".into()]),
            metrics: Some(["total"].iter().collect::<MetricSet>()),
            format_on_write: Some(false),
            suffix: Some("wrap".into()),
            ..MisuraConfig::default()
        };
        let cli = parse(&["-t", "Cache", "--fmt=true", "--suffix", "gen", "--salt-policy", "random"]);
        let config = cli.to_config(&file);

        assert_eq!(config.targets, vec!["Store", "Cache"]);
        assert_eq!(config.metrics.tokens(), ["total"]);
        assert!(config.format_on_write);
        assert_eq!(config.suffix, "gen");
        assert_eq!(config.salt_policy, SaltPolicy::Random);
    }

    #[test]
    fn test_verbose_is_long_only() {
        assert_eq!(parse(&["--verbose", "--verbose"]).verbosity, 2);
        assert!(Cli::try_parse_from(["misura", "-v"]).is_err());
    }

    #[test]
    fn test_config_file_applies_when_flags_absent() {
        let file = MisuraConfig {
            format_on_write: Some(false),
            suffix: Some("wrap".into()),
            ..MisuraConfig::default()
        };
        let config = parse(&[]).to_config(&file);
        assert!(!config.format_on_write);
        assert_eq!(config.suffix, "wrap");
        assert_eq!(config.salt_policy, SaltPolicy::Derived);
    }
}
