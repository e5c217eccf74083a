//! Error type for TP parsing
//!
//! A failed parse produces exactly one `ParseError` pointing at the
//! furthest position the grammar reached. There is no error recovery and no
//! partial AST: one malformed line fails the parse of the whole program.

use std::fmt;

/// A parse failure with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line in the source text.
    pub line: usize,
    /// 1-based column within that line.
    pub column: usize,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}
