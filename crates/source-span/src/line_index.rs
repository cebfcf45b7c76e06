//! Line/column resolution for byte offsets.

use text_size::TextSize;

use crate::span::{ByteOffset, Span};

/// A zero-based line and UTF-8 column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based byte column within the line.
    pub col: u32,
}

/// A resolved source location: start and end line/column of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Where the span starts.
    pub start: LineCol,
    /// Where the span ends.
    pub end: LineCol,
}

/// Maps byte offsets to line/column positions for one source file.
///
/// Built once per file; lookups are a binary search over the newline table.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line. Always contains offset 0.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Builds an index from the source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Resolves a byte offset to its line and column.
    pub fn line_col(&self, offset: ByteOffset) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        LineCol {
            line: line as u32,
            col: (offset - line_start).into(),
        }
    }

    /// Resolves a span to its start/end location pair.
    pub fn location(&self, span: Span) -> Location {
        Location {
            start: self.line_col(span.start),
            end: self.line_col(span.end),
        }
    }
}
