//! Directive comments naming extra targets.
//!
//! A comment of the form `//misura:Store` anywhere in the file adds `Store`
//! to the target set, exactly as if it had been passed with `-t Store`.

use regex::Regex;
use tree_sitter::Node;

use super::parser::GoAst;
use super::visitor::{walk_comments, DeclarationVisitor};
use crate::errors::{MisuraError, Result};

/// Default directive marker.
pub const DEFAULT_MARKER: &str = "misura";

pub struct DirectiveScanner {
    pattern: Regex,
    targets: Vec<String>,
}

impl DirectiveScanner {
    pub fn new(marker: &str) -> Result<Self> {
        let pattern = format!(
            r"^//\s*{}:\s*([\p{{L}}_][\p{{L}}\p{{N}}_]*)\s*$",
            regex::escape(marker)
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| MisuraError::Config(format!("invalid directive marker: {}", e)))?;
        Ok(Self {
            pattern,
            targets: Vec::new(),
        })
    }

    /// Target name carried by one comment, if it is a directive.
    pub fn match_comment<'c>(&self, text: &'c str) -> Option<&'c str> {
        self.pattern
            .captures(text.trim_end())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Names from every directive in the file, in source order, deduplicated.
    pub fn scan(mut self, ast: &GoAst) -> Result<Vec<String>> {
        walk_comments(ast, &mut self)?;
        Ok(self.targets)
    }
}

impl DeclarationVisitor for DirectiveScanner {
    fn visit_comment(&mut self, _ast: &GoAst, text: &str, _node: Node<'_>) -> Result<()> {
        if let Some(name) = self.match_comment(text) {
            if !self.targets.iter().any(|t| t == name) {
                tracing::debug!("directive comment selects {}", name);
                self.targets.push(name.to_string());
            }
        }
        Ok(())
    }
}
