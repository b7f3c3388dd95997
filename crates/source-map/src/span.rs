//! Span and byte offset types.

use text_size::TextSize;

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` in a source string.
///
/// Recognizers report matches as `(index, length)` pairs relative to the text
/// they scanned; `Span` is the absolute form kept once the coordinator has
/// re-offset a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from a `usize` index and length, as reported by recognizers.
    #[inline]
    pub fn from_index_len(index: usize, len: usize) -> Self {
        Self::new(
            TextSize::from(index as u32),
            TextSize::from((index + len) as u32),
        )
    }

    /// Returns the length of this span in bytes.
    #[inline]
    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this span contains the given offset.
    #[inline]
    pub fn contains(&self, offset: ByteOffset) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns the `usize` byte range, for slicing the source text.
    #[inline]
    pub fn range(self) -> std::ops::Range<usize> {
        u32::from(self.start) as usize..u32::from(self.end) as usize
    }
}
