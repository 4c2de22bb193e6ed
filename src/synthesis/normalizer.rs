//! Canonicalization of method parameter and result lists.
//!
//! After normalization every parameter and every result of a method has a
//! name, no two names in the method collide, and the method text carries the
//! rewritten `name type` lists. The rewritten text is what the decorator
//! declares, so call sites can always forward `a, b` and assign `c, err`.

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use super::naming::IdentifierGenerator;
use crate::analyzers::go::{RawContract, RawField, RawMethod, RawResults};
use crate::core::{
    is_context_type, is_error_type, ContractDefinition, MethodSignature, Parameter, ParameterList,
    BLANK_NAME, CONTEXT_NAME, ERROR_NAME,
};
use crate::errors::{MisuraError, Result};

#[derive(Debug, Clone)]
pub struct SignatureNormalizer {
    min_name_length: usize,
}

impl Default for SignatureNormalizer {
    fn default() -> Self {
        Self { min_name_length: 1 }
    }
}

/// Names already claimed within one method.
struct NameScope {
    declared: HashSet<String>,
    used: HashSet<String>,
    generator: IdentifierGenerator,
    /// `err` belongs to the error result; other entries may not keep it
    error_reserved: bool,
}

impl NameScope {
    fn new(raw: &RawMethod, min_name_length: usize) -> Self {
        let (result_fields, error_reserved) = match &raw.results {
            RawResults::List { fields, .. } => (
                fields.as_slice(),
                fields.iter().any(|f| is_error_type(&f.type_text)),
            ),
            RawResults::Bare { type_text, .. } => (&[][..], is_error_type(type_text)),
            RawResults::None => (&[][..], false),
        };
        let declared = raw
            .params
            .iter()
            .chain(result_fields)
            .flat_map(|f| f.names.iter())
            .filter(|n| n.as_str() != BLANK_NAME)
            .cloned()
            .collect();

        Self {
            declared,
            used: HashSet::new(),
            generator: IdentifierGenerator::new(min_name_length),
            error_reserved,
        }
    }

    /// The declared name an entry may keep, if any.
    fn keepable<'n>(&self, declared: Option<&'n str>) -> Option<&'n str> {
        declared.filter(|n| !(self.error_reserved && *n == ERROR_NAME))
    }

    fn synthesize(&mut self) -> String {
        let (declared, used) = (&self.declared, &self.used);
        let name = self
            .generator
            .next_free(|n| declared.contains(n) || used.contains(n));
        self.used.insert(name.clone());
        name
    }

    fn claim(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    /// A reserved name may be taken unless the declaration uses it elsewhere.
    fn reserved_available(&self, reserved: &str, own_name: Option<&str>) -> bool {
        own_name == Some(reserved)
            || (!self.declared.contains(reserved) && !self.used.contains(reserved))
    }
}

/// Expand a field into one `(declared name, field)` pair per name.
fn expand(field: &RawField) -> Vec<Option<&str>> {
    if field.names.is_empty() {
        vec![None]
    } else {
        field
            .names
            .iter()
            .map(|n| Some(n.as_str()).filter(|n| *n != BLANK_NAME))
            .collect()
    }
}

impl SignatureNormalizer {
    pub fn new(min_name_length: usize) -> Self {
        Self {
            min_name_length: min_name_length.max(1),
        }
    }

    pub fn normalize_contract(
        &self,
        raw: &RawContract,
        package_name: &str,
        imports: &str,
        path: &Path,
    ) -> Result<ContractDefinition> {
        let methods = raw
            .methods
            .iter()
            .map(|m| {
                self.normalize_method(m).map_err(|e| match e {
                    MisuraError::UnsupportedConstruct { message, .. } => {
                        MisuraError::unsupported(path, &raw.name, message)
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ContractDefinition {
            name: raw.name.clone(),
            package_name: package_name.to_string(),
            imports: imports.to_string(),
            methods,
        })
    }

    pub fn normalize_method(&self, raw: &RawMethod) -> Result<MethodSignature> {
        let mut scope = NameScope::new(raw, self.min_name_length);
        let mut method = MethodSignature {
            name: raw.name.clone(),
            signature: String::new(),
            params: ParameterList::default(),
            results: ParameterList::default(),
            has_error: false,
            has_context: false,
            context_param: None,
            named_results: false,
        };

        normalize_params(&mut method, &raw.params, &mut scope);
        normalize_results(&mut method, &raw.results, &mut scope);
        method.signature = rewrite_signature(raw, &method)?;

        debug!(
            method = %method.name,
            params = %method.param_names(),
            results = %method.result_names(),
            "normalized method"
        );
        Ok(method)
    }
}

fn normalize_params(method: &mut MethodSignature, fields: &[RawField], scope: &mut NameScope) {
    // declared names are claimed up front so a later rename to `ctx` cannot
    // collide with a parameter that appears after it
    let kept: Vec<&str> = fields
        .iter()
        .flat_map(expand)
        .filter_map(|n| scope.keepable(n))
        .collect();
    for name in kept {
        scope.claim(name);
    }

    for field in fields {
        for declared in expand(field) {
            let declared = scope.keepable(declared);
            let context_slot =
                !method.has_context && !field.variadic && is_context_type(&field.type_text);

            // unnamed entries draw a name even when renamed to `ctx` below,
            // so later synthesized names do not depend on the rename
            let name = match declared {
                Some(name) => name.to_string(),
                None => scope.synthesize(),
            };

            let param = if context_slot && scope.reserved_available(CONTEXT_NAME, declared) {
                scope.claim(CONTEXT_NAME);
                Parameter {
                    is_synthesized: declared != Some(CONTEXT_NAME),
                    ..Parameter::new(CONTEXT_NAME, &field.type_text)
                }
            } else if declared.is_some() {
                Parameter::new(name, &field.type_text)
            } else {
                Parameter::synthesized(name, &field.type_text)
            };

            if context_slot {
                method.has_context = true;
                method.context_param = Some(param.name.clone());
            }
            method.params.push(param);
        }
    }
}

fn normalize_results(method: &mut MethodSignature, results: &RawResults, scope: &mut NameScope) {
    let fields: Vec<RawField> = match results {
        RawResults::None => return,
        RawResults::Bare { type_text, .. } => vec![RawField::unnamed(type_text.clone())],
        RawResults::List { fields, .. } => fields.clone(),
    };

    method.named_results = fields
        .iter()
        .any(|f| f.names.iter().any(|n| n != BLANK_NAME));

    for field in &fields {
        for declared in expand(field) {
            if !method.has_error && is_error_type(&field.type_text) {
                method.has_error = true;
                scope.claim(ERROR_NAME);
                method.results.push(Parameter {
                    is_synthesized: declared != Some(ERROR_NAME),
                    ..Parameter::new(ERROR_NAME, &field.type_text)
                });
                continue;
            }

            let result = match scope.keepable(declared) {
                Some(name) if method.named_results => Parameter::new(name, &field.type_text),
                _ => Parameter::synthesized(scope.synthesize(), &field.type_text),
            };
            method.results.push(result);
        }
    }
}

fn checked_span(text: &str, span: &Range<usize>, what: &str) -> Result<()> {
    if text.get(span.clone()).is_some() {
        Ok(())
    } else {
        Err(MisuraError::unsupported(
            "",
            "",
            format!("{} span {:?} falls outside the method text", what, span),
        ))
    }
}

/// Replace the raw parameter and result spans with the canonical lists.
fn rewrite_signature(raw: &RawMethod, method: &MethodSignature) -> Result<String> {
    let mut text = raw.text.clone();

    // results come after parameters, so replace them first to keep the
    // parameter span valid
    match &raw.results {
        RawResults::None => {}
        RawResults::List { span, .. } | RawResults::Bare { span, .. } => {
            checked_span(&text, span, "result list")?;
            text.replace_range(span.clone(), &format!("({})", method.results.join()));
        }
    }

    checked_span(&text, &raw.params_span, "parameter list")?;
    text.replace_range(raw.params_span.clone(), &format!("({})", method.params.join()));

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a RawMethod by locating the lists in `text` the way the
    /// locator would.
    fn raw_method(text: &str, params: Vec<RawField>, results: RawResults) -> RawMethod {
        let open = text.find('(').unwrap();
        let mut depth = 0;
        let mut close = open;
        for (i, c) in text[open..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = open + i;
                        break;
                    }
                }
                _ => {}
            }
        }
        RawMethod {
            name: text[..open].to_string(),
            text: text.to_string(),
            params_span: open..close + 1,
            params,
            results,
            line: 1,
        }
    }

    fn list(text: &str, fields: Vec<RawField>) -> RawResults {
        let start = text.rfind(" (").unwrap() + 1;
        RawResults::List {
            span: start..text.len(),
            fields,
        }
    }

    fn bare(text: &str, type_text: &str) -> RawResults {
        let start = text.len() - type_text.len();
        RawResults::Bare {
            span: start..text.len(),
            type_text: type_text.to_string(),
        }
    }

    fn normalize(raw: &RawMethod) -> MethodSignature {
        SignatureNormalizer::default().normalize_method(raw).unwrap()
    }

    #[test]
    fn test_unnamed_params_and_results() {
        let text = "Bar(string, int) (string, error)";
        let raw = raw_method(
            text,
            vec![RawField::unnamed("string"), RawField::unnamed("int")],
            list(
                text,
                vec![RawField::unnamed("string"), RawField::unnamed("error")],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Bar(a string, b int) (c string, err error)");
        assert_eq!(m.param_names(), "a, b");
        assert_eq!(m.result_names(), "c, err");
        assert!(m.has_error);
        assert!(!m.named_results);
        assert!(!m.has_context);
    }

    #[test]
    fn test_error_only_bare_result() {
        let text = "Baz() error";
        let raw = raw_method(text, vec![], bare(text, "error"));

        let m = normalize(&raw);
        assert_eq!(m.signature, "Baz() (err error)");
        assert_eq!(m.param_names(), "");
        assert_eq!(m.result_names(), "err");
        assert!(m.has_error);
        assert!(!m.named_results);
    }

    #[test]
    fn test_bare_non_error_result() {
        let text = "Count(prefix string) int";
        let raw = raw_method(
            text,
            vec![RawField::named(["prefix"], "string")],
            bare(text, "int"),
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Count(prefix string) (a int)");
        assert_eq!(m.result_names(), "a");
        assert!(!m.has_error);
    }

    #[test]
    fn test_no_params_no_results() {
        let raw = raw_method("Ping()", vec![], RawResults::None);

        let m = normalize(&raw);
        assert_eq!(m.signature, "Ping()");
        assert!(m.params.is_empty());
        assert!(m.results.is_empty());
        assert_eq!(m.result_names(), "");
    }

    #[test]
    fn test_named_results_are_kept() {
        let text = "Get(key string) (x int, err error)";
        let raw = raw_method(
            text,
            vec![RawField::named(["key"], "string")],
            list(
                text,
                vec![
                    RawField::named(["x"], "int"),
                    RawField::named(["err"], "error"),
                ],
            ),
        );

        let m = normalize(&raw);
        assert!(m.named_results);
        assert!(m.has_error);
        assert_eq!(m.result_names(), "x, err");
        assert_eq!(m.signature, "Get(key string) (x int, err error)");
    }

    #[test]
    fn test_error_result_renamed_to_err() {
        let text = "Load() (n int, failure error)";
        let raw = raw_method(
            text,
            vec![],
            list(
                text,
                vec![
                    RawField::named(["n"], "int"),
                    RawField::named(["failure"], "error"),
                ],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.result_names(), "n, err");
        assert_eq!(m.signature, "Load() (n int, err error)");
    }

    #[test]
    fn test_blank_names_are_synthesized() {
        let text = "Method7(_ string, _ *int, _ []byte) (s string, _ error)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["_"], "string"),
                RawField::named(["_"], "*int"),
                RawField::named(["_"], "[]byte"),
            ],
            list(
                text,
                vec![
                    RawField::named(["s"], "string"),
                    RawField::named(["_"], "error"),
                ],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "a, b, c");
        assert_eq!(m.result_names(), "s, err");
        assert!(m.named_results);
        assert_eq!(
            m.signature,
            "Method7(a string, b *int, c []byte) (s string, err error)"
        );
    }

    #[test]
    fn test_synthesized_names_avoid_declared_names() {
        let text = "Mix(a int, _ string, b bool) (_ int, c int)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["a"], "int"),
                RawField::named(["_"], "string"),
                RawField::named(["b"], "bool"),
            ],
            list(
                text,
                vec![RawField::named(["_"], "int"), RawField::named(["c"], "int")],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "a, d, b");
        assert_eq!(m.result_names(), "e, c");
    }

    #[test]
    fn test_grouped_names_with_blank() {
        let text = "Method4(a, _, c int, _ string)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["a", "_", "c"], "int"),
                RawField::named(["_"], "string"),
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "a, b, c, d");
        assert_eq!(m.signature, "Method4(a int, b int, c int, d string)");
    }

    #[test]
    fn test_context_param_renamed_once() {
        let text = "Do(context.Context, context.Context, string)";
        let raw = raw_method(
            text,
            vec![
                RawField::unnamed("context.Context"),
                RawField::unnamed("context.Context"),
                RawField::unnamed("string"),
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert!(m.has_context);
        assert_eq!(m.context_param.as_deref(), Some("ctx"));
        assert_eq!(m.param_names(), "ctx, b, c");
        assert_eq!(m.params.iter().filter(|p| p.name == "ctx").count(), 1);
    }

    #[test]
    fn test_named_context_param_renamed() {
        let text = "Do(c context.Context, id string)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["c"], "context.Context"),
                RawField::named(["id"], "string"),
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "ctx, id");
        assert_eq!(m.signature, "Do(ctx context.Context, id string)");
    }

    #[test]
    fn test_context_rename_skipped_when_ctx_declared_elsewhere() {
        let text = "Do(c context.Context, ctx string)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["c"], "context.Context"),
                RawField::named(["ctx"], "string"),
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "c, ctx");
        assert_eq!(m.context_param.as_deref(), Some("c"));
    }

    #[test]
    fn test_variadic_param() {
        let text = "Log(format string, args ...any)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["format"], "string"),
                RawField {
                    names: vec!["args".into()],
                    type_text: "...any".into(),
                    variadic: true,
                },
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert_eq!(m.param_names(), "format, args...");
        assert_eq!(m.signature, "Log(format string, args ...any)");
    }

    #[test]
    fn test_only_first_error_result_is_err() {
        let text = "Two() (error, error)";
        let raw = raw_method(
            text,
            vec![],
            list(
                text,
                vec![RawField::unnamed("error"), RawField::unnamed("error")],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.result_names(), "err, a");
    }

    #[test]
    fn test_param_named_err_gives_way_to_error_result() {
        let text = "Do(err string) error";
        let raw = raw_method(
            text,
            vec![RawField::named(["err"], "string")],
            bare(text, "error"),
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Do(a string) (err error)");
        assert_eq!(m.param_names(), "a");
        assert_eq!(m.result_names(), "err");
        assert!(m.params.0[0].is_synthesized);
    }

    #[test]
    fn test_result_named_err_gives_way_to_error_result() {
        let text = "Do() (err int, e error)";
        let raw = raw_method(
            text,
            vec![],
            list(
                text,
                vec![
                    RawField::named(["err"], "int"),
                    RawField::named(["e"], "error"),
                ],
            ),
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Do() (a int, err error)");
        assert_eq!(m.result_names(), "a, err");
        assert!(m.named_results);
    }

    #[test]
    fn test_err_name_kept_without_error_result() {
        let text = "Do(err string) (n int)";
        let raw = raw_method(
            text,
            vec![RawField::named(["err"], "string")],
            list(text, vec![RawField::named(["n"], "int")]),
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Do(err string) (n int)");
        assert!(!m.has_error);
    }

    #[test]
    fn test_unnamed_context_param_consumes_a_name() {
        let text = "Do(context.Context, string)";
        let raw = raw_method(
            text,
            vec![
                RawField::unnamed("context.Context"),
                RawField::unnamed("string"),
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert_eq!(m.signature, "Do(ctx context.Context, b string)");
        assert!(m.params.0[0].is_synthesized);
    }

    #[test]
    fn test_variadic_context_is_not_the_context_param() {
        let text = "Do(key string, ctxs ...context.Context)";
        let raw = raw_method(
            text,
            vec![
                RawField::named(["key"], "string"),
                RawField {
                    names: vec!["ctxs".into()],
                    type_text: "...context.Context".into(),
                    variadic: true,
                },
            ],
            RawResults::None,
        );

        let m = normalize(&raw);
        assert!(!m.has_context);
        assert_eq!(m.context_param, None);
        assert_eq!(m.param_names(), "key, ctxs...");
    }

    #[test]
    fn test_span_outside_text_is_rejected() {
        let mut raw = raw_method("Ping()", vec![], RawResults::None);
        raw.params_span = 4..40;
        let result = SignatureNormalizer::default().normalize_method(&raw);
        assert!(matches!(
            result,
            Err(MisuraError::UnsupportedConstruct { .. })
        ));
    }
}
