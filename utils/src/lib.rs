//! Shared infrastructure utilities for deferlint.
//!
//! This crate holds the filesystem side that the pure checking crates stay
//! away from:
//!
//! - **`walk`**: Recursive discovery of `.go` sources under a root directory

pub mod walk;

pub use walk::{GO_EXTENSION, ScanOptions, WalkError, discover_go_files, normalize_path};
