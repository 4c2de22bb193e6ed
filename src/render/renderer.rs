//! Turns normalized contracts into Go source text.
//!
//! Templates see plain view structs; every placeholder they may reference is
//! a field here. Output of one run is a header followed by one section per
//! contract, each section opened by its salt marker line.

use serde::Serialize;

use super::registry::{TemplateRegistry, HEADER_TEMPLATE, WRAPPER_TEMPLATE};
use super::salt::salt_marker;
use crate::config::MetricFlags;
use crate::core::{GeneratedArtifact, MethodSignature};
use crate::errors::Result;

const CONTEXT_IMPORT: &str = "context";
const TIME_IMPORT: &str = "time";
const BACKGROUND_CONTEXT: &str = "context.Background()";

/// Package-level facts shared by every section of one output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub package_name: String,
    /// Raw import declarations copied from the input
    pub imports: String,
    /// Unquoted paths the input already imports
    pub import_paths: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HeaderView<'a> {
    package_name: &'a str,
    imports: &'a str,
    extra_imports: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct MethodView<'a> {
    name: &'a str,
    signature: &'a str,
    param_names: String,
    result_names: String,
    named_results: bool,
    has_error: bool,
    has_context: bool,
    context_param: &'a str,
    /// Context argument passed to hooks
    context_expr: &'a str,
}

impl<'a> MethodView<'a> {
    fn new(method: &'a MethodSignature) -> Self {
        let context_param = method.context_param.as_deref().unwrap_or("");
        Self {
            name: &method.name,
            signature: &method.signature,
            param_names: method.param_names(),
            result_names: method.result_names(),
            named_results: method.named_results,
            has_error: method.has_error,
            has_context: method.has_context,
            context_param,
            context_expr: if context_param.is_empty() {
                BACKGROUND_CONTEXT
            } else {
                context_param
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WrapperView<'a> {
    package_name: &'a str,
    contract_name: &'a str,
    salt: &'a str,
    salt_marker: String,
    receiver_name: String,
    start_time_name: String,
    duration_name: String,
    has_total: bool,
    has_success: bool,
    has_error: bool,
    has_duration: bool,
    methods: Vec<MethodView<'a>>,
}

impl<'a> WrapperView<'a> {
    fn new(artifact: &'a GeneratedArtifact) -> Self {
        let contract = &artifact.contract;
        let metrics = artifact.metrics;
        Self {
            package_name: &contract.package_name,
            contract_name: &contract.name,
            salt: artifact.salt.as_str(),
            salt_marker: salt_marker(&contract.name, &artifact.salt),
            receiver_name: format!("w{}", artifact.salt),
            start_time_name: artifact.start_time_name(),
            duration_name: artifact.duration_name(),
            has_total: metrics.total,
            has_success: metrics.success,
            has_error: metrics.error,
            has_duration: metrics.duration,
            methods: contract.methods.iter().map(MethodView::new).collect(),
        }
    }
}

/// Imports the generated code needs that the input does not already have.
pub fn required_imports(metrics: &MetricFlags, existing: &[String]) -> Vec<&'static str> {
    let any_hook = metrics.total || metrics.success || metrics.error || metrics.duration;
    let wanted = [
        (CONTEXT_IMPORT, any_hook),
        (TIME_IMPORT, metrics.duration),
    ];
    wanted
        .into_iter()
        .filter(|(path, needed)| *needed && !existing.iter().any(|p| p == path))
        .map(|(path, _)| path)
        .collect()
}

pub struct Renderer<'r> {
    registry: &'r TemplateRegistry,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        Self { registry }
    }

    /// One decorator section, opened by its salt marker.
    pub fn render_section(&self, artifact: &GeneratedArtifact) -> Result<String> {
        let view = WrapperView::new(artifact);
        let body = self.registry.render(WRAPPER_TEMPLATE, &view)?;
        Ok(format!("{}\n{}", view.salt_marker, body.trim()))
    }

    /// Header plus every section, in order.
    pub fn render_file(
        &self,
        header: &FileHeader,
        metrics: &MetricFlags,
        sections: &[String],
    ) -> Result<String> {
        let view = HeaderView {
            package_name: &header.package_name,
            imports: &header.imports,
            extra_imports: required_imports(metrics, &header.import_paths),
        };
        let mut out = self.registry.render(HEADER_TEMPLATE, &view)?.trim_end().to_string();
        for section in sections {
            out.push_str("\n\n");
            out.push_str(section);
        }
        out.push('\n');
        Ok(out)
    }
}
