//! Go front end: turns source text into a [`SourceUnit`].
//!
//! The rest of the crate never calls the parser. It only walks trees that
//! already passed through [`GoParser::parse`], so every tree it sees is free
//! of syntax errors.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{LanguageError, Node, Parser, Tree};

use deferlint_types::Position;

use crate::scanner::LaunchScanner;

/// Longest source excerpt quoted in a syntax error.
const MAX_SNIPPET_CHARS: usize = 40;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] LanguageError),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parser produced no tree for {}", .path.display())]
    NoTree { path: PathBuf },
    #[error("{}:{position}: syntax error near `{snippet}`", .path.display())]
    Syntax {
        path: PathBuf,
        position: Position,
        snippet: String,
    },
}

impl ParseError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Language(_) => None,
            Self::Read { path, .. } | Self::NoTree { path } | Self::Syntax { path, .. } => {
                Some(path)
            }
        }
    }
}

/// Parser for Go source units.
///
/// Holds a tree-sitter parser, so one instance per thread.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Read and parse one file.
    pub fn parse_file(&mut self, path: &Path) -> Result<SourceUnit, ParseError> {
        let source = fs::read_to_string(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(path, source)
    }

    /// Parse already loaded source text.
    ///
    /// Trees containing error or missing nodes are rejected. The grammar is
    /// stricter than `go/parser` in a few corners (a stray `;` opening a
    /// block, for one), so such files are reported as syntax errors even
    /// though the Go toolchain builds them.
    pub fn parse(
        &mut self,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<SourceUnit, ParseError> {
        let path = path.into();
        let source = source.into();

        let Some(tree) = self.parser.parse(&source, None) else {
            return Err(ParseError::NoTree { path });
        };

        let root = tree.root_node();
        if root.has_error() {
            let broken = first_error_node(root).unwrap_or(root);
            let snippet = snippet_at(&source, broken);
            return Err(ParseError::Syntax {
                path,
                position: position_of(broken),
                snippet,
            });
        }

        tracing::trace!(path = %path.display(), bytes = source.len(), "Parsed source unit");
        Ok(SourceUnit { path, source, tree })
    }
}

/// A parsed Go file: its path, text, and syntax tree.
///
/// Read-only. Scanning borrows the unit, so the same unit can be checked any
/// number of times, from any number of threads.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl SourceUnit {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// A fresh pre-order scan over every `go` statement in the unit.
    #[must_use]
    pub fn launches(&self) -> LaunchScanner<'_> {
        LaunchScanner::new(self.tree.root_node(), self.source.as_bytes())
    }

    /// Indented outline of the named nodes in the tree, one per line.
    ///
    /// ```text
    /// source_file 1:1
    ///   package_clause 1:1
    ///     package_identifier 1:9
    /// ```
    #[must_use]
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let mut cursor = self.tree.walk();
        // Named flag of every node between the root and the cursor.
        let mut ancestors: Vec<bool> = Vec::new();
        let mut depth = 0;
        loop {
            let node = cursor.node();
            if node.is_named() {
                let field = cursor
                    .field_name()
                    .map(|field| format!("{field}: "))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "{:indent$}{field}{} {}\n",
                    "",
                    node.kind(),
                    position_of(node),
                    indent = depth * 2
                ));
            }

            if cursor.goto_first_child() {
                ancestors.push(node.is_named());
                depth += usize::from(node.is_named());
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return out;
                }
                if ancestors.pop() == Some(true) {
                    depth -= 1;
                }
            }
        }
    }
}

pub(crate) fn position_of(node: Node<'_>) -> Position {
    let point = node.start_position();
    Position::new(node.start_byte(), point.row + 1, point.column + 1)
}

fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn snippet_at(source: &str, node: Node<'_>) -> String {
    let start = node.start_byte().min(source.len());
    let rest = source.get(start..).unwrap_or_default();
    let line = rest.lines().next().unwrap_or_default().trim();
    line.chars().take(MAX_SNIPPET_CHARS).collect()
}
