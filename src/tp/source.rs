//! Byte-offset to line/column conversion
//!
//! Grammar failures are reported by the combinator layer as byte offsets
//! into the parsed text. `SourceMap` converts those offsets to the 1-based
//! line/column positions the crate's `ParseError` carries, using a binary
//! search over precomputed line starts.

/// Precomputed line-start table for one source text.
pub struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair.
    ///
    /// Offsets past the end of a line resolve to positions on that line;
    /// offsets past the end of the text resolve to the last line.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let column = offset - self.line_starts[line_index] + 1;
        (line_index + 1, column)
    }
}
