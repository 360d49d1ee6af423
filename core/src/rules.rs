//! Rule engine: one [`Finding`] per launch statement.
//!
//! Pure functions of the callable shape and the [`ConventionSpec`]. Matching
//! is on identifiers taken from the tree, so formatting never matters.

use deferlint_types::{
    Callable, ConventionSpec, Finding, LaunchStatement, Outcome, Statement, ViolationKind,
};

#[must_use]
pub fn check_launch(launch: &LaunchStatement, spec: &ConventionSpec) -> Finding {
    Finding::new(launch.position, classify(&launch.callable, spec))
}

#[must_use]
pub fn classify(callable: &Callable, spec: &ConventionSpec) -> Outcome {
    match callable {
        Callable::InlineBlock(body) => check_inline_block(body, spec),
        // Trusted: the named function is assumed to defer the recovery itself.
        Callable::NamedReference(name) => {
            if name == spec.function() {
                Outcome::Pass
            } else {
                Outcome::Violation(ViolationKind::WrongFunctionName)
            }
        }
        Callable::QualifiedReference { namespace, name } => {
            let module_ok = namespace == spec.module();
            let function_ok = name == spec.function();
            match (module_ok, function_ok) {
                (true, true) => Outcome::Pass,
                (false, _) => Outcome::Violation(ViolationKind::WrongModule),
                (true, false) => Outcome::Violation(ViolationKind::WrongFunctionName),
            }
        }
        Callable::Unrecognized(_) => Outcome::Violation(ViolationKind::NotADirectCall),
    }
}

fn check_inline_block(body: &[Statement], spec: &ConventionSpec) -> Outcome {
    let Some(first) = body.first() else {
        return Outcome::Pass;
    };
    let recovers = first
        .as_defer()
        .is_some_and(|target| target.is_qualified(spec.module(), spec.function()));
    if recovers {
        Outcome::Pass
    } else {
        Outcome::Violation(ViolationKind::MissingOrWrongRecoveryDefer)
    }
}
