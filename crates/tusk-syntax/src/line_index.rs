//! Mapping between byte offsets and line/column positions.
//!
//! Columns are measured in UTF-16 code units, matching the default LSP
//! position encoding.

use text_size::{TextRange, TextSize};

/// A line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column in UTF-16 code units.
    pub col: u32,
}

/// An index of line start offsets for a fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the line containing `offset`.
    #[must_use]
    pub fn line_for_offset(&self, offset: TextSize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line as u32,
            Err(next) => next.saturating_sub(1) as u32,
        }
    }

    /// Converts a byte offset into a line/column position.
    ///
    /// `text` must be the same text the index was built from.
    #[must_use]
    pub fn line_col(&self, text: &str, offset: TextSize) -> LineCol {
        let offset = offset.min(TextSize::of(text));
        let line = self.line_for_offset(offset);
        let line_start = self.line_starts[line as usize];
        let fragment = &text[usize::from(line_start)..usize::from(offset)];
        let col = fragment.chars().map(char::len_utf16).sum::<usize>() as u32;
        LineCol { line, col }
    }

    /// Converts a line/column position into a byte offset.
    ///
    /// Positions past the end of a line clamp to the line end; lines past
    /// the end of the text clamp to the text end.
    #[must_use]
    pub fn offset(&self, text: &str, pos: LineCol) -> TextSize {
        let Some(&line_start) = self.line_starts.get(pos.line as usize) else {
            return TextSize::of(text);
        };
        let line_end = self
            .line_starts
            .get(pos.line as usize + 1)
            .map_or(TextSize::of(text), |&next| next);
        let line_text = &text[usize::from(line_start)..usize::from(line_end)];

        let mut units = 0u32;
        for (i, ch) in line_text.char_indices() {
            if units >= pos.col || ch == '\n' {
                return line_start + TextSize::from(i as u32);
            }
            units += ch.len_utf16() as u32;
        }
        line_end
    }

    /// Converts a byte range into a pair of line/column positions.
    #[must_use]
    pub fn line_col_range(&self, text: &str, range: TextRange) -> (LineCol, LineCol) {
        (
            self.line_col(text, range.start()),
            self.line_col(text, range.end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_round_trip() {
        let text = "ab\ncde\n\nf";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 4);

        for (offset, line, col) in [(0, 0, 0), (2, 0, 2), (3, 1, 0), (5, 1, 2), (7, 2, 0), (8, 3, 0)]
        {
            let pos = index.line_col(text, TextSize::from(offset));
            assert_eq!((pos.line, pos.col), (line, col), "offset {offset}");
            assert_eq!(index.offset(text, pos), TextSize::from(offset));
        }
    }

    #[test]
    fn test_utf16_columns() {
        let text = "a\u{1F600}b\n";
        let index = LineIndex::new(text);
        // The emoji is 4 bytes but 2 UTF-16 units.
        let pos = index.line_col(text, TextSize::from(5));
        assert_eq!((pos.line, pos.col), (0, 3));
        assert_eq!(index.offset(text, pos), TextSize::from(5));
    }

    #[test]
    fn test_clamping() {
        let text = "ab\ncd";
        let index = LineIndex::new(text);
        assert_eq!(
            index.offset(text, LineCol { line: 9, col: 0 }),
            TextSize::from(5)
        );
        assert_eq!(
            index.offset(text, LineCol { line: 0, col: 99 }),
            TextSize::from(2)
        );
    }
}
