//! Per-file generation driver.
//!
//! One call to [`Generator::generate_file`] reads a Go file, selects targets
//! from configuration and directive comments, runs every target contract
//! through `normalize → resolve salt → render`, then formats and atomically
//! writes a single output file. A contract that fails is left out of the
//! output and recorded in the report; failures that affect the whole file
//! abort before anything is written.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, debug_span, info, info_span, warn};

use super::report::{GenerationReport, OutputStatus};
use crate::analyzers::go::{parse_source, ContractLocator, DirectiveScanner, GoAst, RawContract};
use crate::config::{GeneratorConfig, MetricFlags};
use crate::core::{GeneratedArtifact, Stage};
use crate::errors::{MisuraError, Result, ResultExt};
use crate::io::{output_path, FileSystem};
use crate::render::{
    resolve_salt, FileHeader, Renderer, SaltSource, SourceFormatter, TemplateRegistry,
};
use crate::synthesis::SignatureNormalizer;

/// File-wide inputs shared by every contract.
struct FileContext<'f> {
    input: &'f Path,
    package_name: &'f str,
    imports: &'f str,
    metrics: MetricFlags,
    previous_output: Option<&'f str>,
}

pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    registry: &'a TemplateRegistry,
    formatter: &'a dyn SourceFormatter,
    fs: &'a dyn FileSystem,
    normalizer: SignatureNormalizer,
    directive_marker: String,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        registry: &'a TemplateRegistry,
        formatter: &'a dyn SourceFormatter,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            config,
            registry,
            formatter,
            fs,
            normalizer: SignatureNormalizer::default(),
            directive_marker: crate::analyzers::go::DEFAULT_MARKER.to_string(),
        }
    }

    /// Use a directive prefix other than `misura`.
    pub fn with_directive_marker(mut self, marker: impl Into<String>) -> Self {
        self.directive_marker = marker.into();
        self
    }

    pub fn generate_file(&self, input: &Path) -> Result<GenerationReport> {
        let span = info_span!("generate", file = %input.display());
        let _guard = span.enter();

        let source = self.fs.read_to_string(input).at_stage(Stage::Parsing)?;
        let ast = parse_source(&source, input).at_stage(Stage::Parsing)?;

        let targets = self.select_targets(&ast)?;
        if targets.is_empty() {
            return Err(MisuraError::Config(format!(
                "no target contracts for {}; pass --target or add a //{}:<Name> comment",
                input.display(),
                self.directive_marker
            )));
        }
        debug!(targets = ?targets, "selected targets");

        let mut outcome = ContractLocator::new(&targets)
            .locate(&ast)
            .at_stage(Stage::Located)?;

        let Some(package_name) = outcome.package_name.take() else {
            return Err(missing_package(input, &mut outcome.failures));
        };

        let output = output_path(input, &self.config.suffix);
        let mut report = GenerationReport::new(output.clone());
        report.unmatched = outcome.unmatched;
        for (contract, error) in outcome.failures {
            report.fail(contract, error.at_stage(Stage::Located));
        }

        let metrics = self.config.metrics.resolve();
        debug!(metrics = %self.config.metrics, ?metrics, "resolved metrics");

        let previous_output = self.fs.read_if_exists(&output).at_stage(Stage::Parsing)?;
        let file = FileContext {
            input,
            package_name: &package_name,
            imports: &outcome.imports,
            metrics,
            previous_output: previous_output.as_deref(),
        };

        let renderer = Renderer::new(self.registry);
        let mut sections = Vec::new();
        for raw in &outcome.contracts {
            match self.generate_contract(&renderer, &file, raw) {
                Ok(section) => {
                    report.generated.push(raw.name.clone());
                    sections.push(section);
                }
                Err(error) => {
                    warn!("skipping {}: {}", raw.name, error);
                    report.fail(raw.name.clone(), error);
                }
            }
        }

        if sections.is_empty() {
            warn!("no contract could be generated; {} left untouched", output.display());
            return Ok(report);
        }

        let header = FileHeader {
            package_name: package_name.clone(),
            imports: outcome.imports.clone(),
            import_paths: outcome.import_paths.clone(),
        };
        let text = renderer
            .render_file(&header, &metrics, &sections)
            .at_stage(Stage::Rendered)?;

        let text = if self.config.format_on_write {
            self.formatter
                .format(&output, &text)
                .at_stage(Stage::Formatted)?
        } else {
            text
        };

        if previous_output.as_deref() == Some(text.as_str()) {
            debug!("{} is up to date", output.display());
            report.status = OutputStatus::Unchanged;
            return Ok(report);
        }

        self.fs.write_atomic(&output, &text).at_stage(Stage::Written)?;
        info!(
            contracts = report.generated.len(),
            "wrote {}",
            output.display()
        );
        report.status = OutputStatus::Written;
        Ok(report)
    }

    /// Configured targets plus every directive comment in the file.
    fn select_targets(&self, ast: &GoAst) -> Result<BTreeSet<String>> {
        let mut targets: BTreeSet<String> = self.config.targets.iter().cloned().collect();
        let directives = DirectiveScanner::new(&self.directive_marker)?
            .scan(ast)
            .at_stage(Stage::Parsing)?;
        targets.extend(directives);
        Ok(targets)
    }

    fn generate_contract(
        &self,
        renderer: &Renderer<'_>,
        file: &FileContext<'_>,
        raw: &RawContract,
    ) -> Result<String> {
        let span = debug_span!("contract", name = %raw.name);
        let _guard = span.enter();

        let contract = self
            .normalizer
            .normalize_contract(raw, file.package_name, file.imports, file.input)
            .at_stage(Stage::Normalized)?;

        let (salt, source) =
            resolve_salt(self.config.salt_policy, file.previous_output, file.input, &raw.name);
        if source == SaltSource::Reused {
            info!("reusing salt {} for {}", salt, raw.name);
        } else {
            debug!(?source, "new salt {} for {}", salt, raw.name);
        }

        let artifact = GeneratedArtifact {
            contract,
            salt,
            metrics: file.metrics,
        };
        renderer
            .render_section(&artifact)
            .at_stage(Stage::Rendered)
    }
}

/// File-level error for contracts declared without a package clause.
fn missing_package(input: &Path, failures: &mut Vec<(String, MisuraError)>) -> MisuraError {
    let position = failures
        .iter()
        .position(|(_, e)| matches!(e, MisuraError::MissingPackageName { .. }));
    let error = match position {
        Some(index) => failures.swap_remove(index).1,
        None => MisuraError::parse(input, 1, 1, "missing package clause"),
    };
    error.at_stage(Stage::Located)
}
