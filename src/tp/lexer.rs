//! Line scanner for the TP format
//!
//! TP programs are line-oriented; the grammar never needs a token stream,
//! only a classification of each physical line. The scanning pipeline is:
//! 1. Raw line splitting with byte offsets (`scan_lines`)
//! 2. Marker classification using the logos lexer (`tokens::LineToken`)
//! 3. Continuation joining (`join_continuations`): a line whose first
//!    non-blank character is a bare `:` is folded into the previous line
//!    and replaced by a blank placeholder so later lines keep their
//!    1-based physical numbers.
//!
//! Continuation joining is a textual transform, not part of the grammar,
//! and runs exactly once before any grammar parsing begins.

pub mod lines;
pub mod tokens;

pub use lines::{join_continuations, scan_lines, LineKind, SourceLine};
pub use tokens::LineToken;

/// Scan source text into classified lines with continuations joined.
pub fn scan(source: &str) -> Vec<SourceLine> {
    join_continuations(scan_lines(source))
}
