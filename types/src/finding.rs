//! Verification results.
//!
//! A violation is data, not an error: the engine always returns a [`Finding`]
//! and the caller decides what a violation means for the process.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{ConventionSpec, Position};

/// Why a launch statement breaks the recovery convention.
///
/// The set is closed. A new kind needs a new callable shape to go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The func literal does not open with the required deferred call.
    MissingOrWrongRecoveryDefer,
    /// The launched function (or its selector) has the wrong name.
    WrongFunctionName,
    /// The launched function lives in the wrong package.
    WrongModule,
    /// The launched expression is not a literal or a direct reference.
    NotADirectCall,
}

impl ViolationKind {
    pub const ALL: [Self; 4] = [
        Self::MissingOrWrongRecoveryDefer,
        Self::WrongFunctionName,
        Self::WrongModule,
        Self::NotADirectCall,
    ];

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingOrWrongRecoveryDefer => "missing_or_wrong_recovery_defer",
            Self::WrongFunctionName => "wrong_function_name",
            Self::WrongModule => "wrong_module",
            Self::NotADirectCall => "not_a_direct_call",
        }
    }

    /// Human-readable message naming the expected construct.
    #[must_use]
    pub fn message(self, spec: &ConventionSpec) -> String {
        match self {
            Self::MissingOrWrongRecoveryDefer => {
                format!("First statement should be '{}'", spec.expected_defer())
            }
            Self::WrongFunctionName => {
                format!("Deferred function should be '{}()'", spec.function())
            }
            Self::WrongModule => format!(
                "Deferred function should call '{}()' in '{}' package",
                spec.function(),
                spec.module()
            ),
            Self::NotADirectCall => "Go statement should always call a func lit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Violation(ViolationKind),
}

impl Outcome {
    #[must_use]
    pub fn is_pass(self) -> bool {
        self == Self::Pass
    }

    #[must_use]
    pub fn violation(self) -> Option<ViolationKind> {
        match self {
            Self::Pass => None,
            Self::Violation(kind) => Some(kind),
        }
    }
}

/// The result of checking one launch statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    position: Position,
    outcome: Outcome,
}

impl Finding {
    #[must_use]
    pub fn new(position: Position, outcome: Outcome) -> Self {
        Self { position, outcome }
    }

    #[must_use]
    pub fn pass(position: Position) -> Self {
        Self::new(position, Outcome::Pass)
    }

    #[must_use]
    pub fn violation(position: Position, kind: ViolationKind) -> Self {
        Self::new(position, Outcome::Violation(kind))
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// All findings for one unit, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    path: PathBuf,
    findings: Vec<Finding>,
}

impl UnitReport {
    #[must_use]
    pub fn new(path: PathBuf, findings: Vec<Finding>) -> Self {
        Self { path, findings }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| !f.outcome().is_pass())
            .count()
    }

    /// `(unitPath, Finding)` pairs for the diagnostic sink.
    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Finding)> {
        self.findings.iter().map(|f| (self.path.as_path(), f))
    }
}
