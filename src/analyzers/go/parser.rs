//! Tree-sitter parser integration for Go
//!
//! Provides parsing using the tree-sitter Go grammar.

use crate::errors::{MisuraError, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Parsed Go source file
pub struct GoAst {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
}

impl std::fmt::Debug for GoAst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoAst")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

impl GoAst {
    /// Get text for a node of this tree
    pub fn text(&self, node: &Node) -> &str {
        node_text(node, &self.source)
    }
}

/// Parse Go source code into a tree-sitter AST
///
/// A tree containing ERROR or MISSING nodes is rejected with the position of
/// the first offending node.
pub fn parse_source(content: &str, path: &Path) -> Result<GoAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| {
            MisuraError::parse(path, 0, 0, format!("Failed to set tree-sitter language: {}", e))
        })?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| MisuraError::parse(path, 0, 0, "Failed to parse source code"))?;

    if let Some(bad) = first_error_node(&tree.root_node()) {
        let message = if bad.is_missing() {
            format!("missing {}", bad.kind())
        } else {
            let snippet: String = node_text(&bad, content).chars().take(40).collect();
            format!("unexpected '{}'", snippet.trim())
        };
        return Err(MisuraError::parse(
            path,
            node_line(&bad),
            node_column(&bad),
            message,
        ));
    }

    Ok(GoAst {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// First ERROR or MISSING node in document order
fn first_error_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error_node)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    &source[start..end]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}
