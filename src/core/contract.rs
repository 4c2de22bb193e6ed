//! Canonical contract model produced by normalization.
//!
//! A [`ContractDefinition`] is built fresh for every generation run, is never
//! mutated after normalization, and is dropped once its decorator has been
//! rendered.

use crate::config::MetricFlags;
use crate::render::Salt;

/// Reserved name given to the error-convention result.
pub const ERROR_NAME: &str = "err";

/// Reserved name given to the context-convention parameter.
pub const CONTEXT_NAME: &str = "ctx";

/// Placeholder name meaning "no name needed".
pub const BLANK_NAME: &str = "_";

/// Type text of the error convention.
pub const ERROR_TYPE: &str = "error";

/// Trailing-expansion marker used by variadic parameters.
pub const VARIADIC_MARKER: &str = "...";

/// Returns true when `type_text` denotes the cancellation/context convention.
pub fn is_context_type(type_text: &str) -> bool {
    type_text == "Context" || type_text.ends_with(".Context")
}

/// Returns true when `type_text` denotes the error convention.
pub fn is_error_type(type_text: &str) -> bool {
    type_text == ERROR_TYPE
}

/// A single parameter or result after normalization.
///
/// Results share this representation; `is_variadic` is always false for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Opaque type expression, including the `...` prefix for variadics.
    pub type_text: String,
    pub is_variadic: bool,
    pub is_synthesized: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        let type_text = type_text.into();
        Self {
            name: name.into(),
            is_variadic: type_text.starts_with(VARIADIC_MARKER),
            type_text,
            is_synthesized: false,
        }
    }

    pub fn synthesized(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            is_synthesized: true,
            ..Self::new(name, type_text)
        }
    }

    /// Name as written at a call site (`args...` for variadics).
    pub fn call_name(&self) -> String {
        if self.is_variadic {
            format!("{}{}", self.name, VARIADIC_MARKER)
        } else {
            self.name.clone()
        }
    }
}

/// Ordered parameter (or result) list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList(pub Vec<Parameter>);

impl ParameterList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    pub fn push(&mut self, param: Parameter) {
        self.0.push(param);
    }

    /// `a, b, args...`
    pub fn join_names(&self) -> String {
        self.0
            .iter()
            .map(Parameter::call_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `string, *int`
    pub fn join_types(&self) -> String {
        self.0
            .iter()
            .map(|p| p.type_text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `a string, b *int`
    pub fn join(&self) -> String {
        self.0
            .iter()
            .map(|p| format!("{} {}", p.name, p.type_text))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One normalized method of a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    /// Full method text with parameter and result lists re-rendered.
    pub signature: String,
    pub params: ParameterList,
    pub results: ParameterList,
    pub has_error: bool,
    pub has_context: bool,
    pub context_param: Option<String>,
    /// True iff the declaration supplied at least one non-blank result name.
    pub named_results: bool,
}

impl MethodSignature {
    pub fn param_names(&self) -> String {
        self.params.join_names()
    }

    pub fn result_names(&self) -> String {
        self.results.join_names()
    }
}

/// A located and normalized interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDefinition {
    pub name: String,
    pub package_name: String,
    /// Raw text of every import declaration in the source file.
    pub imports: String,
    pub methods: Vec<MethodSignature>,
}

/// Everything the renderer needs for one decorator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub contract: ContractDefinition,
    pub salt: Salt,
    pub metrics: MetricFlags,
}

impl GeneratedArtifact {
    pub fn start_time_name(&self) -> String {
        format!("start{}", self.salt)
    }

    pub fn duration_name(&self) -> String {
        format!("duration{}", self.salt)
    }
}
