//! Syntactic shapes of launched and deferred callables.

use std::fmt;

use crate::Position;

/// The expression a `go` or `defer` statement invokes, reduced to the shapes
/// the convention rules care about.
///
/// Anything the scanner cannot place into the first three shapes lands in
/// [`Callable::Unrecognized`]; it is never dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    /// A function literal: `go func() { ... }()`.
    InlineBlock(Vec<Statement>),
    /// A bare identifier: `go worker()`.
    NamedReference(String),
    /// A package-qualified identifier: `go pkg.Worker()`.
    QualifiedReference { namespace: String, name: String },
    /// Any other expression. Holds the grammar node kind for diagnostics.
    Unrecognized(String),
}

impl Callable {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::NamedReference(name.into())
    }

    #[must_use]
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::QualifiedReference {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::InlineBlock(_) => "inline_block",
            Self::NamedReference(_) => "named_reference",
            Self::QualifiedReference { .. } => "qualified_reference",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// True when this is exactly `namespace.name`.
    #[must_use]
    pub fn is_qualified(&self, namespace: &str, name: &str) -> bool {
        matches!(
            self,
            Self::QualifiedReference { namespace: ns, name: n } if ns == namespace && n == name
        )
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineBlock(body) => write!(f, "func literal ({} statements)", body.len()),
            Self::NamedReference(name) => f.write_str(name),
            Self::QualifiedReference { namespace, name } => write!(f, "{namespace}.{name}"),
            Self::Unrecognized(kind) => write!(f, "<{kind}>"),
        }
    }
}

/// One statement of an inline block, as far as the rules need to see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `defer <callable>(...)`
    Defer(Callable),
    /// Any other statement, by grammar node kind.
    Other(String),
}

impl Statement {
    #[must_use]
    pub fn as_defer(&self) -> Option<&Callable> {
        match self {
            Self::Defer(target) => Some(target),
            Self::Other(_) => None,
        }
    }
}

/// A `go` statement found in a unit. Created by the scanner and consumed by
/// the rule engine right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchStatement {
    pub position: Position,
    pub callable: Callable,
}

impl LaunchStatement {
    #[must_use]
    pub fn new(position: Position, callable: Callable) -> Self {
        Self { position, callable }
    }
}
