//! Declaration shapes extracted from the Go syntax tree.
//!
//! These hold raw source text only; canonical names are assigned later by
//! [`crate::synthesis::SignatureNormalizer`].

use std::ops::Range;

/// One `parameter_declaration` (or result entry) as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Declared names; empty when the entry is a bare type.
    pub names: Vec<String>,
    /// Type text, with a `...` prefix for variadic parameters.
    pub type_text: String,
    pub variadic: bool,
}

impl RawField {
    pub fn unnamed(type_text: impl Into<String>) -> Self {
        Self {
            names: Vec::new(),
            type_text: type_text.into(),
            variadic: false,
        }
    }

    pub fn named<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        type_text: impl Into<String>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            type_text: type_text.into(),
            variadic: false,
        }
    }
}

/// Result part of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResults {
    None,
    /// `(string, error)` or `(s string, err error)`; span includes parentheses
    List {
        span: Range<usize>,
        fields: Vec<RawField>,
    },
    /// A single unparenthesized type such as `error`
    Bare { span: Range<usize>, type_text: String },
}

/// A method element of an interface.
///
/// Spans are byte offsets into `text`, not into the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    pub text: String,
    /// Parameter list span, parentheses included
    pub params_span: Range<usize>,
    pub params: Vec<RawField>,
    pub results: RawResults,
    /// 1-based line of the method in the source file
    pub line: usize,
}

/// An interface type declaration selected as a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContract {
    pub name: String,
    pub line: usize,
    pub methods: Vec<RawMethod>,
}
