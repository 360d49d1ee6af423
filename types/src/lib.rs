//! Core domain types for deferlint.
//!
//! This crate contains pure domain types with no IO and no parser dependency.
//! The scanner in `deferlint-core` lowers syntax trees into these types, and
//! everything downstream (rule engine, reports) only ever sees them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod callable;
mod convention;
mod finding;
mod position;

pub use callable::{Callable, LaunchStatement, Statement};
pub use convention::{ConventionError, ConventionSpec, DEFAULT_FUNCTION, DEFAULT_MODULE};
pub use finding::{Finding, Outcome, UnitReport, ViolationKind};
pub use position::Position;
