//! Byte ranges into schema source text.

use std::ops::Range;

/// A half-open byte range into a source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span covering `range`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span of the position at 1-based `row` and `col` in `source`, as
    /// reported by the XML reader, covering one character.
    pub fn at_text_pos(source: &str, row: u32, col: u32) -> Self {
        let mut offset = 0;
        for (index, line) in source.split_inclusive('\n').enumerate() {
            if index + 1 == row as usize {
                let column_offset = line
                    .char_indices()
                    .nth(col.saturating_sub(1) as usize)
                    .map_or(line.len(), |(offset, _)| offset);
                let start = offset + column_offset;
                let width = source[start..].chars().next().map_or(0, char::len_utf8);
                return Self::new(start..start + width);
            }
            offset += line.len();
        }
        Self::new(source.len()..source.len())
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
