//! Launch scanner: finds every `go` statement in a unit.
//!
//! The scan is a pre-order walk over an explicit stack, so launches come out
//! in document order and a launch nested inside another launched literal
//! follows its parent. Each `go` statement is lowered into a
//! [`LaunchStatement`] on the way out.

use tree_sitter::Node;

use deferlint_types::{Callable, LaunchStatement, Statement};

use crate::source::position_of;

const GO_STATEMENT: &str = "go_statement";
const DEFER_STATEMENT: &str = "defer_statement";
const CALL_EXPRESSION: &str = "call_expression";
const FUNC_LITERAL: &str = "func_literal";
const IDENTIFIER: &str = "identifier";
const SELECTOR_EXPRESSION: &str = "selector_expression";
const STATEMENT_LIST: &str = "statement_list";
const COMMENT: &str = "comment";
const TYPE_ARGUMENTS: &str = "type_arguments";

/// Lazy iterator over the launch statements of one tree.
///
/// Obtain one with [`crate::SourceUnit::launches`].
pub struct LaunchScanner<'unit> {
    source: &'unit [u8],
    stack: Vec<Node<'unit>>,
}

impl<'unit> LaunchScanner<'unit> {
    pub(crate) fn new(root: Node<'unit>, source: &'unit [u8]) -> Self {
        Self {
            source,
            stack: vec![root],
        }
    }

    fn push_children(&mut self, node: Node<'unit>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        self.stack.extend(children.into_iter().rev());
    }

    fn lower_launch(&self, node: Node<'unit>) -> LaunchStatement {
        let callable = match first_significant_child(node) {
            Some(expr) if expr.kind() == CALL_EXPRESSION => self.lower_call_target(expr),
            Some(expr) => Callable::Unrecognized(expr.kind().to_string()),
            None => Callable::Unrecognized(node.kind().to_string()),
        };
        LaunchStatement::new(position_of(node), callable)
    }

    fn lower_call_target(&self, call: Node<'unit>) -> Callable {
        // `f[T]()` calls an instantiation, never a plain reference.
        if call.child_by_field_name(TYPE_ARGUMENTS).is_some() {
            return Callable::Unrecognized(TYPE_ARGUMENTS.to_string());
        }
        match call.child_by_field_name("function") {
            Some(function) => self.lower_callable(function),
            None => Callable::Unrecognized(call.kind().to_string()),
        }
    }

    fn lower_callable(&self, expr: Node<'unit>) -> Callable {
        match expr.kind() {
            FUNC_LITERAL => {
                let body = expr
                    .child_by_field_name("body")
                    .map(|block| self.lower_block(block))
                    .unwrap_or_default();
                Callable::InlineBlock(body)
            }
            IDENTIFIER => Callable::NamedReference(self.text(expr)),
            SELECTOR_EXPRESSION => {
                let operand = expr.child_by_field_name("operand");
                let field = expr.child_by_field_name("field");
                match (operand, field) {
                    (Some(operand), Some(field)) if operand.kind() == IDENTIFIER => {
                        Callable::qualified(self.text(operand), self.text(field))
                    }
                    _ => Callable::Unrecognized(SELECTOR_EXPRESSION.to_string()),
                }
            }
            other => Callable::Unrecognized(other.to_string()),
        }
    }

    fn lower_block(&self, block: Node<'unit>) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut cursor = block.walk();
        for child in block.named_children(&mut cursor) {
            match child.kind() {
                COMMENT => {}
                STATEMENT_LIST => {
                    let mut inner = child.walk();
                    statements.extend(
                        child
                            .named_children(&mut inner)
                            .filter(|n| n.kind() != COMMENT)
                            .map(|n| self.lower_statement(n)),
                    );
                }
                _ => statements.push(self.lower_statement(child)),
            }
        }
        statements
    }

    fn lower_statement(&self, stmt: Node<'unit>) -> Statement {
        if stmt.kind() != DEFER_STATEMENT {
            return Statement::Other(stmt.kind().to_string());
        }
        let target = match first_significant_child(stmt) {
            Some(expr) if expr.kind() == CALL_EXPRESSION => self.lower_call_target(expr),
            Some(expr) => Callable::Unrecognized(expr.kind().to_string()),
            None => Callable::Unrecognized(DEFER_STATEMENT.to_string()),
        };
        Statement::Defer(target)
    }

    fn text(&self, node: Node<'unit>) -> String {
        node.utf8_text(self.source)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl Iterator for LaunchScanner<'_> {
    type Item = LaunchStatement;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.push_children(node);
            if node.kind() == GO_STATEMENT {
                let launch = self.lower_launch(node);
                tracing::trace!(
                    position = %launch.position,
                    shape = launch.callable.shape(),
                    "Found launch statement"
                );
                return Some(launch);
            }
        }
        None
    }
}

fn first_significant_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != COMMENT)
}
