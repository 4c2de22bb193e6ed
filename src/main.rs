use anyhow::{Context, Result};
use misura::cli::{self, format_report, Cli};
use misura::config::{load_config, load_config_file, GeneratorConfig};
use misura::io::RealFileSystem;
use misura::pipeline::{GenerationReport, Generator};
use misura::render::{CommandFormatter, NoopFormatter, SourceFormatter, TemplateRegistry};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::parse_args();
    cli::init_logging(args.verbosity);

    match run(&args) {
        Ok(report) => {
            eprint!("{}", format_report(&report));
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<GenerationReport> {
    let file_config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config(),
    };
    let config = args.to_config(&file_config);
    config.validate()?;

    let input = config
        .file_path
        .clone()
        .context("no input file; pass --file or run through go generate ($GOFILE)")?;

    let registry = TemplateRegistry::load(config.template_path.as_deref())?;
    let formatter = select_formatter(&config)?;
    let fs = RealFileSystem::new();

    let report = Generator::new(&config, &registry, formatter.as_ref(), &fs)
        .generate_file(&input)
        .with_context(|| format!("failed to generate decorators for {}", input.display()))?;
    Ok(report)
}

fn select_formatter(config: &GeneratorConfig) -> Result<Box<dyn SourceFormatter>> {
    if config.format_on_write {
        Ok(Box::new(CommandFormatter::discover()?))
    } else {
        Ok(Box::new(NoopFormatter))
    }
}
