//! Line/column source coordinates.

use std::cmp::Ordering;
use std::fmt;

/// A point in the source text.
///
/// `line` and `column` are 1-based; `column` counts Unicode scalar values
/// from the start of the line. `offset` is the byte offset of the point.
///
/// Ordering compares `(line, column)` only, which is what the layout
/// algorithm reasons about. Two positions built from the same source agree
/// on `offset` whenever they agree on line and column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl SourcePos {
    /// Position of the first character of a file.
    pub const START: SourcePos = SourcePos {
        line: 1,
        column: 1,
        offset: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        SourcePos {
            line,
            column,
            offset,
        }
    }
}

impl PartialOrd for SourcePos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourcePos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

impl fmt::Debug for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SourcePos;
    crate::static_assert_size!(SourcePos, 12);
}
