// Chunk: docs/chunks/line_model - Line data model + provider interfaces
//!
//! A logical line as delivered by the line provider.
//!
//! Positions are expressed in three index spaces:
//! - character columns (what cursors and hit-testing use)
//! - UTF-8 byte offsets (what style spans use, and how `str` is sliced)
//! - UTF-16 code-unit offsets (what UTF-16 text APIs on the host side use)
//!
//! Each line carries two index tables, `ch_to_8` and `ch_to_16`, with one
//! entry per character column plus a terminal entry equal to the total length
//! in that space. Slicing by column always goes through a table so a slice can
//! never split a multi-byte character.

use std::ops::Range;

use thiserror::Error;

use crate::style::StyleId;

/// Half-open byte range `[start, start + len)` within a line's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteRange {
    pub start: usize,
    pub len: usize,
}

impl ByteRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Exclusive end offset, or `None` if it does not fit in a `usize`.
    pub fn checked_end(&self) -> Option<usize> {
        self.start.checked_add(self.len)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// A byte range of a line tagged with a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    pub style: StyleId,
    pub range: ByteRange,
}

impl StyleSpan {
    pub fn new(style: StyleId, start: usize, len: usize) -> Self {
        Self {
            style,
            range: ByteRange::new(start, len),
        }
    }
}

/// Validation failures for line data received from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("{table} index table has {found} entries, expected {expected}")]
    TableLength {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{table} index table is not strictly increasing at column {col}")]
    TableNotMonotonic { table: &'static str, col: usize },
    #[error("{table} index table ends at {found}, expected {expected}")]
    TableEnd {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("utf8 index table entry {offset} is not a character boundary")]
    NotCharBoundary { offset: usize },
    #[error("style span {index} ends at byte {end}, past the line length {len}")]
    SpanOutOfBounds { index: usize, end: usize, len: usize },
    #[error("cursor column {col} is past the line end (column {char_count})")]
    CursorOutOfBounds { col: usize, char_count: usize },
}

/// Line content with styles, cursors and index tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    styles: Vec<StyleSpan>,
    cursors: Vec<usize>,
    ch_to_8: Vec<usize>,
    ch_to_16: Vec<usize>,
}

impl Line {
    /// Creates an unstyled line without cursors, deriving both index tables.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut ch_to_8 = Vec::with_capacity(text.len() + 1);
        let mut ch_to_16 = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;
        for (byte, ch) in text.char_indices() {
            ch_to_8.push(byte);
            ch_to_16.push(utf16);
            utf16 += ch.len_utf16();
        }
        ch_to_8.push(text.len());
        ch_to_16.push(utf16);
        Self {
            text,
            styles: Vec::new(),
            cursors: Vec::new(),
            ch_to_8,
            ch_to_16,
        }
    }

    /// Assembles a line from provider-supplied parts, validating every table.
    pub fn from_parts(
        text: impl Into<String>,
        styles: Vec<StyleSpan>,
        cursors: Vec<usize>,
        ch_to_8: Vec<usize>,
        ch_to_16: Vec<usize>,
    ) -> Result<Self, LineError> {
        let text = text.into();
        let char_count = text.chars().count();
        let utf16_len: usize = text.chars().map(char::len_utf16).sum();

        check_table("utf8", &ch_to_8, char_count, text.len())?;
        check_table("utf16", &ch_to_16, char_count, utf16_len)?;
        if let Some(&offset) = ch_to_8.iter().find(|&&b| !text.is_char_boundary(b)) {
            return Err(LineError::NotCharBoundary { offset });
        }

        Self {
            text,
            styles: Vec::new(),
            cursors: Vec::new(),
            ch_to_8,
            ch_to_16,
        }
        .with_styles(styles)?
        .with_cursors(cursors)
    }

    /// Replaces the style spans, rejecting spans that run past the text.
    pub fn with_styles(mut self, styles: Vec<StyleSpan>) -> Result<Self, LineError> {
        let len = self.text.len();
        for (index, span) in styles.iter().enumerate() {
            match span.range.checked_end() {
                Some(end) if end <= len => {}
                end => {
                    return Err(LineError::SpanOutOfBounds {
                        index,
                        end: end.unwrap_or(usize::MAX),
                        len,
                    });
                }
            }
        }
        self.styles = styles;
        Ok(self)
    }

    /// Replaces the cursor columns, rejecting columns past the line end.
    pub fn with_cursors(mut self, mut cursors: Vec<usize>) -> Result<Self, LineError> {
        let char_count = self.char_count();
        if let Some(&col) = cursors.iter().find(|&&c| c > char_count) {
            return Err(LineError::CursorOutOfBounds { col, char_count });
        }
        cursors.sort_unstable();
        self.cursors = cursors;
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[StyleSpan] {
        &self.styles
    }

    /// Cursor columns, sorted ascending.
    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    /// Number of character columns in the line.
    pub fn char_count(&self) -> usize {
        self.ch_to_8.len() - 1
    }

    /// Byte offset of column `col`, clamped to the line end.
    pub fn byte_offset(&self, col: usize) -> usize {
        self.ch_to_8[col.min(self.char_count())]
    }

    /// UTF-16 offset of column `col`, clamped to the line end.
    pub fn utf16_offset(&self, col: usize) -> usize {
        self.ch_to_16[col.min(self.char_count())]
    }

    /// Length of the line in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        self.ch_to_16[self.char_count()]
    }

    /// Column of the character containing byte `byte`.
    ///
    /// Offsets inside a multi-byte character map to that character's column;
    /// offsets at or past the end map to `char_count()`.
    pub fn col_for_byte(&self, byte: usize) -> usize {
        if byte >= self.text.len() {
            return self.char_count();
        }
        self.ch_to_8.partition_point(|&b| b <= byte) - 1
    }

    /// Column range covered by a byte range, widened to whole characters.
    pub fn cols_for_bytes(&self, range: ByteRange) -> Range<usize> {
        let start = self.col_for_byte(range.start);
        let end = if range.len == 0 {
            start
        } else {
            self.col_for_byte(range.end() - 1) + 1
        };
        start..end.min(self.char_count())
    }

    /// Text of the columns in `cols`, clamped to the line.
    pub fn slice_cols(&self, cols: Range<usize>) -> &str {
        let start = self.byte_offset(cols.start);
        let end = self.byte_offset(cols.end).max(start);
        &self.text[start..end]
    }
}

fn check_table(
    table: &'static str,
    entries: &[usize],
    char_count: usize,
    total: usize,
) -> Result<(), LineError> {
    if entries.len() != char_count + 1 {
        return Err(LineError::TableLength {
            table,
            expected: char_count + 1,
            found: entries.len(),
        });
    }
    if let Some(col) = entries.windows(2).position(|w| w[0] >= w[1]) {
        return Err(LineError::TableNotMonotonic { table, col: col + 1 });
    }
    let last = entries[char_count];
    if entries[0] != 0 || last != total {
        return Err(LineError::TableEnd {
            table,
            expected: total,
            found: last,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Index tables ====================

    #[test]
    fn test_ascii_tables_are_identity() {
        let line = Line::new("abc");
        assert_eq!(line.char_count(), 3);
        assert_eq!(line.byte_offset(2), 2);
        assert_eq!(line.utf16_offset(3), 3);
    }

    #[test]
    fn test_multibyte_tables() {
        // 'é' is 2 bytes / 1 unit, '😀' is 4 bytes / 2 units
        let line = Line::new("aé😀b");
        assert_eq!(line.char_count(), 4);
        assert_eq!(
            (0..=4).map(|c| line.byte_offset(c)).collect::<Vec<_>>(),
            vec![0, 1, 3, 7, 8]
        );
        assert_eq!(
            (0..=4).map(|c| line.utf16_offset(c)).collect::<Vec<_>>(),
            vec![0, 1, 2, 4, 5]
        );
        assert_eq!(line.utf16_len(), 5);
    }

    #[test]
    fn test_empty_line() {
        let line = Line::new("");
        assert_eq!(line.char_count(), 0);
        assert_eq!(line.byte_offset(5), 0);
        assert_eq!(line.slice_cols(0..3), "");
    }

    #[test]
    fn test_col_for_byte_snaps_into_character() {
        let line = Line::new("aé😀b");
        assert_eq!(line.col_for_byte(0), 0);
        assert_eq!(line.col_for_byte(2), 1); // second byte of 'é'
        assert_eq!(line.col_for_byte(5), 2); // inside the emoji
        assert_eq!(line.col_for_byte(7), 3);
        assert_eq!(line.col_for_byte(8), 4);
        assert_eq!(line.col_for_byte(99), 4);
    }

    #[test]
    fn test_cols_for_bytes_widens_to_whole_chars() {
        let line = Line::new("aé😀b");
        assert_eq!(line.cols_for_bytes(ByteRange::new(1, 2)), 1..2);
        assert_eq!(line.cols_for_bytes(ByteRange::new(2, 3)), 1..3);
        assert_eq!(line.cols_for_bytes(ByteRange::new(3, 0)), 2..2);
    }

    #[test]
    fn test_slice_cols_never_splits_characters() {
        let line = Line::new("aé😀b");
        assert_eq!(line.slice_cols(1..3), "é😀");
        assert_eq!(line.slice_cols(2..99), "😀b");
        assert_eq!(line.slice_cols(3..1), "");
    }

    // ==================== Validation ====================

    #[test]
    fn test_from_parts_accepts_consistent_tables() {
        let line = Line::from_parts(
            "né",
            vec![StyleSpan::new(StyleId(4), 0, 3)],
            vec![2],
            vec![0, 1, 3],
            vec![0, 1, 2],
        )
        .unwrap();
        let expected = Line::new("né")
            .with_styles(vec![StyleSpan::new(StyleId(4), 0, 3)])
            .unwrap()
            .with_cursors(vec![2])
            .unwrap();
        assert_eq!(line, expected);
    }

    #[test]
    fn test_from_parts_rejects_short_table() {
        let err = Line::from_parts("ab", vec![], vec![], vec![0, 2], vec![0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            LineError::TableLength {
                table: "utf8",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_non_boundary_offsets() {
        assert!(Line::from_parts("éa", vec![], vec![], vec![0, 2, 3], vec![0, 1, 2]).is_ok());
        // Strictly increasing with correct ends, but 2 is inside 'é' (bytes 1..3)
        let err = Line::from_parts("aé", vec![], vec![], vec![0, 2, 3], vec![0, 1, 2]).unwrap_err();
        assert_eq!(err, LineError::NotCharBoundary { offset: 2 });
    }

    #[test]
    fn test_from_parts_rejects_wrong_end() {
        let err = Line::from_parts("ab", vec![], vec![], vec![0, 1, 2], vec![0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            LineError::TableEnd {
                table: "utf16",
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_span_past_end_rejected() {
        let err = Line::new("abc")
            .with_styles(vec![StyleSpan::new(StyleId(3), 2, 5)])
            .unwrap_err();
        assert_eq!(err, LineError::SpanOutOfBounds { index: 0, end: 7, len: 3 });
    }

    #[test]
    fn test_span_with_overflowing_end_rejected() {
        let err = Line::new("abc")
            .with_styles(vec![
                StyleSpan::new(StyleId(3), 0, 1),
                StyleSpan::new(StyleId(4), usize::MAX, 2),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            LineError::SpanOutOfBounds {
                index: 1,
                end: usize::MAX,
                len: 3
            }
        );
        assert_eq!(ByteRange::new(usize::MAX, 2).checked_end(), None);
        assert_eq!(ByteRange::new(usize::MAX, 2).end(), usize::MAX);
    }

    #[test]
    fn test_cursors_sorted_and_bounded() {
        let line = Line::new("abc").with_cursors(vec![3, 0, 2]).unwrap();
        assert_eq!(line.cursors(), &[0, 2, 3]);
        let err = Line::new("abc").with_cursors(vec![4]).unwrap_err();
        assert_eq!(err, LineError::CursorOutOfBounds { col: 4, char_count: 3 });
    }
}
