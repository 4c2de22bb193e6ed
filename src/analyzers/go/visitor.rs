//! Typed traversal over top-level Go declarations.
//!
//! [`walk_declarations`] dispatches each top-level node to the callback for
//! its declaration kind; [`walk_comments`] visits every comment in the file,
//! nested or not. Callbacks default to no-ops so visitors only implement
//! what they need.

use super::parser::GoAst;
use crate::errors::Result;
use tree_sitter::Node;

/// A named `type_spec` and the node of its type expression.
#[derive(Debug, Clone, Copy)]
pub struct TypeSpec<'t> {
    pub name: &'t str,
    pub spec: Node<'t>,
    pub ty: Node<'t>,
}

pub trait DeclarationVisitor {
    fn visit_package(&mut self, _ast: &GoAst, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Called once per `import` declaration, single or grouped.
    fn visit_import(&mut self, _ast: &GoAst, _decl: Node<'_>) -> Result<()> {
        Ok(())
    }

    fn visit_interface(&mut self, _ast: &GoAst, _spec: TypeSpec<'_>) -> Result<()> {
        Ok(())
    }

    fn visit_struct(&mut self, _ast: &GoAst, _spec: TypeSpec<'_>) -> Result<()> {
        Ok(())
    }

    /// Named types that are neither interfaces nor structs.
    fn visit_other_type(&mut self, _ast: &GoAst, _spec: TypeSpec<'_>) -> Result<()> {
        Ok(())
    }

    fn visit_comment(&mut self, _ast: &GoAst, _text: &str, _node: Node<'_>) -> Result<()> {
        Ok(())
    }
}

/// Visit the package clause, imports and type declarations at file level.
pub fn walk_declarations<V: DeclarationVisitor + ?Sized>(ast: &GoAst, visitor: &mut V) -> Result<()> {
    let root = ast.tree.root_node();
    let mut cursor = root.walk();

    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => {
                if let Some(ident) = child.named_child(0) {
                    visitor.visit_package(ast, ast.text(&ident))?;
                }
            }
            "import_declaration" => visitor.visit_import(ast, child)?,
            "type_declaration" => walk_type_declaration(ast, child, visitor)?,
            _ => {}
        }
    }

    Ok(())
}

fn walk_type_declaration<V: DeclarationVisitor + ?Sized>(
    ast: &GoAst,
    decl: Node<'_>,
    visitor: &mut V,
) -> Result<()> {
    let mut cursor = decl.walk();

    // grouped `type ( ... )` declarations hold several specs
    for spec in decl.named_children(&mut cursor) {
        if spec.kind() != "type_spec" {
            continue;
        }
        let (Some(name), Some(ty)) = (
            spec.child_by_field_name("name"),
            spec.child_by_field_name("type"),
        ) else {
            continue;
        };

        let name = ast.text(&name);
        if name.is_empty() {
            tracing::debug!("ignoring unnamed type declaration");
            continue;
        }

        let type_spec = TypeSpec { name, spec, ty };
        match ty.kind() {
            "interface_type" => visitor.visit_interface(ast, type_spec)?,
            "struct_type" => visitor.visit_struct(ast, type_spec)?,
            _ => visitor.visit_other_type(ast, type_spec)?,
        }
    }

    Ok(())
}

/// Visit every comment node in the file.
pub fn walk_comments<V: DeclarationVisitor + ?Sized>(ast: &GoAst, visitor: &mut V) -> Result<()> {
    walk_comments_recursive(ast, ast.tree.root_node(), visitor)
}

fn walk_comments_recursive<V: DeclarationVisitor + ?Sized>(
    ast: &GoAst,
    node: Node<'_>,
    visitor: &mut V,
) -> Result<()> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "comment" {
            visitor.visit_comment(ast, ast.text(&child), child)?;
        } else {
            walk_comments_recursive(ast, child, visitor)?;
        }
    }
    Ok(())
}
