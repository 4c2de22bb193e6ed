//! Named template registry.
//!
//! The registry is built explicitly by the caller and handed to the
//! generator; there is no process-wide instance.

use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

use crate::errors::{MisuraError, Result};

/// Template rendering the generated-file header.
pub const HEADER_TEMPLATE: &str = "header";

/// Template rendering one decorator section.
pub const WRAPPER_TEMPLATE: &str = "wrapper";

const BUILTIN_HEADER: &str = include_str!("../../templates/header.hbs");
const BUILTIN_WRAPPER: &str = include_str!("../../templates/wrapper.hbs");

pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlebars.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &names)
            .finish()
    }
}

impl TemplateRegistry {
    /// Registry holding only the built-in header and wrapper templates.
    pub fn builtin() -> Result<Self> {
        Self::with_wrapper(BUILTIN_WRAPPER)
    }

    /// Built-in header plus a caller-supplied wrapper template.
    pub fn with_wrapper(wrapper: &str) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Unknown placeholders are errors, never silently empty.
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut registry = Self { handlebars };
        registry.register(HEADER_TEMPLATE, BUILTIN_HEADER)?;
        registry.register(WRAPPER_TEMPLATE, wrapper)?;
        Ok(registry)
    }

    /// Load the wrapper template from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| MisuraError::io(path, e))?;
        tracing::debug!("loaded wrapper template from {}", path.display());
        Self::with_wrapper(&text)
    }

    /// Built-in templates, or the wrapper at `path` when one is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn register(&mut self, name: &str, text: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, text)
            .map_err(|e| MisuraError::template(name, e.to_string()))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(|e| MisuraError::template(name, e.to_string()))
    }
}
