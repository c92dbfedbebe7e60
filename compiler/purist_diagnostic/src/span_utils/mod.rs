//! Line and column lookup for byte offsets.
//!
//! The lexer computes [`SourcePos`] for every token as it scans, but
//! diagnostics only carry byte spans. Emitters use [`LineOffsetTable`] to map
//! a span back to `line:column` and to fetch the text of the offending line.

use purist_ir::{SourcePos, Span};

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use purist_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 12), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0]` is always 0.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters, not bytes, from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col_text = source.get(line_start..end).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Full position of a byte offset.
    pub fn position(&self, source: &str, offset: u32) -> SourcePos {
        let (line, column) = self.offset_to_line_col(source, offset);
        SourcePos::new(line, column, offset)
    }

    /// Get the byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line, without its line terminator.
    pub fn line_text<'src>(&self, source: &'src str, line: u32) -> Option<&'src str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute the 1-based line number where a span starts.
///
/// For repeated lookups, use [`LineOffsetTable`] instead.
pub fn line_number(source: &str, span: Span) -> u32 {
    LineOffsetTable::build(source).line_from_offset(span.start)
}
