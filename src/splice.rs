//! Ordered splicing of replacement text over an original source.

use crate::converter::LocationConverter;
use proc_macro2::LineColumn;

#[derive(Debug)]
pub(crate) struct Splicer<'original> {
    original: &'original str,
    converter: LocationConverter<'original>,
    rewritten: String,
    offset: usize,
    line_column: LineColumn,
}

impl<'original> Splicer<'original> {
    pub fn new(original: &'original str) -> Self {
        Self {
            original,
            converter: LocationConverter::new(original),
            rewritten: String::new(),
            offset: 0,
            line_column: LineColumn { line: 1, column: 0 },
        }
    }

    /// Replaces the text between `start` and `end` with `replacement`. A
    /// `start` equal to `end` is an insertion. Splices must arrive in source
    /// order and must not overlap.
    pub fn splice(&mut self, start: LineColumn, end: LineColumn, replacement: &str) {
        assert!(
            self.line_column <= start,
            "splices must arrive in source order: {:?} precedes {:?}",
            start,
            self.line_column,
        );
        assert!(start <= end, "{start:?} follows {end:?}");

        let (start_offset, start_ascii) = self.converter.offset_from_line_column(start);
        let (end_offset, end_ascii) = self.converter.offset_from_line_column(end);
        assert!(!end_ascii || start_ascii);

        self.rewritten += &self.original[self.offset..start_offset];
        self.rewritten += replacement;

        self.offset = end_offset;
        self.line_column = end;
    }

    #[must_use]
    pub fn into_contents(mut self) -> String {
        self.rewritten += &self.original[self.offset..];
        self.rewritten
    }
}
