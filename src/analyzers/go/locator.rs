//! Finds target interfaces in a parsed Go file.
//!
//! The locator records the package name and the raw import text while it
//! walks, since both are needed to render a decorator. Each target becomes
//! either a [`RawContract`] or a per-contract failure; one bad target never
//! hides the others.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};
use tree_sitter::Node;

use super::parser::{node_line, GoAst};
use super::types::{RawContract, RawField, RawMethod, RawResults};
use super::visitor::{walk_declarations, DeclarationVisitor, TypeSpec};
use crate::errors::{MisuraError, Result};

/// What one pass over a file produced.
#[derive(Debug, Default)]
pub struct LocateOutcome {
    pub package_name: Option<String>,
    /// Raw text of every import declaration, newline-joined
    pub imports: String,
    /// Unquoted import paths
    pub import_paths: Vec<String>,
    pub contracts: Vec<RawContract>,
    pub failures: Vec<(String, MisuraError)>,
    /// Targets with no declaration of that name in the file
    pub unmatched: Vec<String>,
}

pub struct ContractLocator<'a> {
    targets: &'a BTreeSet<String>,
    matched: BTreeSet<String>,
    outcome: LocateOutcome,
}

impl<'a> ContractLocator<'a> {
    pub fn new(targets: &'a BTreeSet<String>) -> Self {
        Self {
            targets,
            matched: BTreeSet::new(),
            outcome: LocateOutcome::default(),
        }
    }

    pub fn locate(mut self, ast: &GoAst) -> Result<LocateOutcome> {
        walk_declarations(ast, &mut self)?;

        self.outcome.unmatched = self
            .targets
            .difference(&self.matched)
            .cloned()
            .collect();
        for name in &self.outcome.unmatched {
            warn!("target '{}' not found in {}", name, ast.path.display());
        }

        Ok(self.outcome)
    }

    /// True (and remembered) when `name` was asked for.
    fn is_target(&mut self, name: &str) -> bool {
        if !self.targets.contains(name) {
            debug!("ignoring {} since it is not a target", name);
            return false;
        }
        self.matched.insert(name.to_string());
        true
    }

    fn fail(&mut self, name: &str, error: MisuraError) {
        warn!("{}", error);
        self.outcome.failures.push((name.to_string(), error));
    }
}

impl DeclarationVisitor for ContractLocator<'_> {
    fn visit_package(&mut self, _ast: &GoAst, name: &str) -> Result<()> {
        self.outcome.package_name = Some(name.to_string());
        Ok(())
    }

    fn visit_import(&mut self, ast: &GoAst, decl: Node<'_>) -> Result<()> {
        if !self.outcome.imports.is_empty() {
            self.outcome.imports.push('\n');
        }
        self.outcome.imports.push_str(ast.text(&decl));
        collect_import_paths(ast, decl, &mut self.outcome.import_paths);
        Ok(())
    }

    fn visit_interface(&mut self, ast: &GoAst, spec: TypeSpec<'_>) -> Result<()> {
        if !self.is_target(spec.name) {
            return Ok(());
        }

        if self.outcome.package_name.is_none() {
            let error = MisuraError::MissingPackageName {
                path: ast.path.clone(),
                contract: spec.name.to_string(),
            };
            self.fail(spec.name, error);
            return Ok(());
        }

        match extract_interface(ast, spec) {
            Ok(contract) => {
                debug!(
                    contract = %contract.name,
                    methods = contract.methods.len(),
                    "located contract"
                );
                self.outcome.contracts.push(contract);
            }
            Err(error) => self.fail(spec.name, error),
        }
        Ok(())
    }

    fn visit_struct(&mut self, ast: &GoAst, spec: TypeSpec<'_>) -> Result<()> {
        if self.is_target(spec.name) {
            let error = MisuraError::unsupported(
                &ast.path,
                spec.name,
                "struct types are not supported, only interfaces can be wrapped",
            );
            self.fail(spec.name, error);
        }
        Ok(())
    }

    fn visit_other_type(&mut self, ast: &GoAst, spec: TypeSpec<'_>) -> Result<()> {
        if self.is_target(spec.name) {
            let error = MisuraError::unsupported(
                &ast.path,
                spec.name,
                format!("'{}' is not an interface", ast.text(&spec.ty)),
            );
            self.fail(spec.name, error);
        }
        Ok(())
    }
}

fn collect_import_paths(ast: &GoAst, node: Node<'_>, paths: &mut Vec<String>) {
    if node.kind() == "import_spec" {
        if let Some(path) = node.child_by_field_name("path") {
            let path = ast.text(&path).trim_matches(|c| c == '"' || c == '`');
            paths.push(path.to_string());
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_import_paths(ast, child, paths);
    }
}

fn unsupported(path: &Path, contract: &str, message: impl Into<String>) -> MisuraError {
    MisuraError::unsupported(path, contract, message)
}

/// Build the raw method list of an interface type.
pub fn extract_interface(ast: &GoAst, spec: TypeSpec<'_>) -> Result<RawContract> {
    if spec.spec.child_by_field_name("type_parameters").is_some() {
        return Err(unsupported(
            &ast.path,
            spec.name,
            "generic interfaces are not supported",
        ));
    }

    let mut methods = Vec::new();
    let mut cursor = spec.ty.walk();
    for elem in spec.ty.named_children(&mut cursor) {
        match elem.kind() {
            "method_elem" | "method_spec" => methods.push(extract_method(ast, spec.name, elem)?),
            "comment" => {}
            _ => {
                return Err(unsupported(
                    &ast.path,
                    spec.name,
                    format!(
                        "embedded type or constraint '{}' at line {} cannot be wrapped",
                        ast.text(&elem),
                        node_line(&elem)
                    ),
                ))
            }
        }
    }

    Ok(RawContract {
        name: spec.name.to_string(),
        line: node_line(&spec.spec),
        methods,
    })
}

fn extract_method(ast: &GoAst, contract: &str, elem: Node<'_>) -> Result<RawMethod> {
    let missing = |what: &str| {
        unsupported(
            &ast.path,
            contract,
            format!("method at line {} has no {}", node_line(&elem), what),
        )
    };
    let name = elem.child_by_field_name("name").ok_or_else(|| missing("name"))?;
    let params = elem
        .child_by_field_name("parameters")
        .ok_or_else(|| missing("parameter list"))?;

    let base = elem.start_byte();
    let relative = |node: &Node| node.start_byte() - base..node.end_byte() - base;

    let results = match elem.child_by_field_name("result") {
        None => RawResults::None,
        Some(result) if result.kind() == "parameter_list" => RawResults::List {
            span: relative(&result),
            fields: extract_fields(ast, contract, result)?,
        },
        Some(result) => RawResults::Bare {
            span: relative(&result),
            type_text: ast.text(&result).to_string(),
        },
    };

    Ok(RawMethod {
        name: ast.text(&name).to_string(),
        text: ast.text(&elem).to_string(),
        params_span: relative(&params),
        params: extract_fields(ast, contract, params)?,
        results,
        line: node_line(&elem),
    })
}

fn extract_fields(ast: &GoAst, contract: &str, list: Node<'_>) -> Result<Vec<RawField>> {
    let mut fields = Vec::new();
    let mut cursor = list.walk();

    for decl in list.named_children(&mut cursor) {
        let ty = decl.child_by_field_name("type");
        match (decl.kind(), ty) {
            ("parameter_declaration", Some(ty)) => {
                let mut names_cursor = decl.walk();
                let names = decl
                    .children_by_field_name("name", &mut names_cursor)
                    .map(|n| ast.text(&n).to_string())
                    .collect();
                fields.push(RawField {
                    names,
                    type_text: ast.text(&ty).to_string(),
                    variadic: false,
                });
            }
            ("variadic_parameter_declaration", Some(ty)) => {
                let names = decl
                    .child_by_field_name("name")
                    .map(|n| vec![ast.text(&n).to_string()])
                    .unwrap_or_default();
                fields.push(RawField {
                    names,
                    type_text: format!("...{}", ast.text(&ty)),
                    variadic: true,
                });
            }
            ("comment", _) => {}
            (kind, _) => {
                return Err(unsupported(
                    &ast.path,
                    contract,
                    format!(
                        "cannot interpret {} '{}' at line {}",
                        kind,
                        ast.text(&decl),
                        node_line(&decl)
                    ),
                ))
            }
        }
    }

    Ok(fields)
}
