//! Conversion between `proc_macro2::LineColumn` positions and byte offsets.
//!
//! Queries must arrive in non-decreasing position order, which lets the
//! converter resume from its previous answer instead of rescanning the file.
//! The rewriter satisfies this naturally because edits are applied in source
//! order.

use proc_macro2::LineColumn;
use std::str::Chars;

#[derive(Debug)]
pub struct LocationConverter<'original> {
    rest: Chars<'original>,
    line_column: LineColumn,
    offset: usize,
    ascii: bool,
}

impl<'original> LocationConverter<'original> {
    #[must_use]
    pub fn new(original: &'original str) -> Self {
        Self {
            rest: original.chars(),
            line_column: LineColumn { line: 1, column: 0 },
            offset: 0,
            ascii: true,
        }
    }

    /// Returns the byte offset of `line_column`, and whether everything up to
    /// it is ASCII. Columns count characters, matching `proc_macro2`.
    pub fn offset_from_line_column(&mut self, line_column: LineColumn) -> (usize, bool) {
        assert!(
            self.line_column <= line_column,
            "positions must be queried in order: {:?} precedes {:?}",
            line_column,
            self.line_column,
        );

        while self.line_column < line_column {
            let Some(ch) = self.rest.next() else {
                break;
            };
            self.advance(ch);
        }

        (self.offset, self.ascii)
    }

    /// Returns the (line, column) of byte offset `offset`. The offset must
    /// fall on a character boundary.
    pub fn line_column_from_offset(&mut self, offset: usize) -> LineColumn {
        assert!(
            self.offset <= offset,
            "offsets must be queried in order: {} precedes {}",
            offset,
            self.offset,
        );

        while self.offset < offset {
            let Some(ch) = self.rest.next() else {
                break;
            };
            self.advance(ch);
        }

        self.line_column
    }

    fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        self.ascii &= ch.is_ascii();
        if ch == '\n' {
            self.line_column.line += 1;
            self.line_column.column = 0;
        } else {
            self.line_column.column += 1;
        }
    }
}
