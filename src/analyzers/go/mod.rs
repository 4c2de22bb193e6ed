//! Go source analysis
//!
//! Parses Go files with tree-sitter and extracts the interfaces selected for
//! decoration.

pub mod directives;
pub mod locator;
pub mod parser;
pub mod types;
pub mod visitor;

pub use directives::{DirectiveScanner, DEFAULT_MARKER};
pub use locator::{extract_interface, ContractLocator, LocateOutcome};
pub use parser::{has_parse_errors, node_column, node_line, node_text, parse_source, GoAst};
pub use types::{RawContract, RawField, RawMethod, RawResults};
pub use visitor::{walk_comments, walk_declarations, DeclarationVisitor, TypeSpec};
