//! Byte-offset spans.

use text_size::{TextRange, TextSize};

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open `[start, end)` byte range in the original source.
///
/// Every tree node produced by the parser carries one; nodes synthesized by
/// the rewriter reuse the span of the node they were derived from, so a
/// diagnostic raised against synthesized output still points at real source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a zero-length span at the given offset.
    #[inline]
    pub fn at(offset: impl Into<ByteOffset>) -> Self {
        let offset = offset.into();
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length of this span in bytes.
    #[inline]
    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    /// Returns true if this span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns true if `offset` falls inside this span.
    #[inline]
    pub fn contains(&self, offset: ByteOffset) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(span.start, span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(2u32, 7u32).len(), TextSize::from(5));
        assert!(Span::at(3u32).is_empty());
        assert!(!Span::new(3u32, 4u32).is_empty());
    }

    #[test]
    fn test_span_cover() {
        let covered = Span::new(4u32, 9u32).cover(Span::new(1u32, 6u32));
        assert_eq!(covered, Span::new(1u32, 9u32));
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(2u32, 5u32);
        assert!(span.contains(TextSize::from(2)));
        assert!(span.contains(TextSize::from(4)));
        assert!(!span.contains(TextSize::from(5)));
    }
}
