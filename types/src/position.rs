use std::fmt;

use serde::Serialize;

/// Location of a node inside a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// 0-indexed byte offset from the start of the unit.
    offset: usize,
    /// 1-indexed line.
    line: usize,
    /// 1-indexed column, counted in bytes.
    column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn line(self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }

    /// Byte position as reported by the Go toolchain for a single-file set.
    ///
    /// `go/token` numbers positions from 1, so this is `offset + 1`.
    #[must_use]
    pub const fn legacy_offset(self) -> usize {
        self.offset + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
