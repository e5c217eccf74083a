//! Line-marker tokens for the TP format
//!
//! Only the first token of a line matters for classification; everything
//! after it belongs to the line grammars. Lines that match no marker are
//! content lines (header attributes, position-table bodies, and so on).

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum LineToken {
    /// `/PROG <name>` — program header.
    #[token("/PROG")]
    Program,

    /// `/ATTR` — attribute section marker.
    #[token("/ATTR")]
    Attributes,

    /// `/APPL` — application section marker.
    #[token("/APPL")]
    Application,

    /// `/MN` — main instruction block marker.
    #[token("/MN")]
    Main,

    /// `/POS` — position table marker.
    #[token("/POS")]
    Positions,

    /// `/END` — end-of-program marker.
    #[token("/END")]
    End,

    /// `<n>:` — a numbered instruction line.
    #[regex(r"[0-9]+:")]
    Numbered,

    /// A bare `:` — continuation of the previous line.
    #[token(":")]
    Continuation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(line: &str) -> Option<Result<LineToken, ()>> {
        LineToken::lexer(line).next()
    }

    #[test]
    fn test_markers() {
        assert_eq!(first("/PROG  TEST"), Some(Ok(LineToken::Program)));
        assert_eq!(first("/ATTR"), Some(Ok(LineToken::Attributes)));
        assert_eq!(first("/MN"), Some(Ok(LineToken::Main)));
        assert_eq!(first("/POS"), Some(Ok(LineToken::Positions)));
        assert_eq!(first("/END"), Some(Ok(LineToken::End)));
    }

    #[test]
    fn test_numbered_line() {
        assert_eq!(first("   1:  J P[1] 100% FINE ;"), Some(Ok(LineToken::Numbered)));
        assert_eq!(first("12:R[1]=5 ;"), Some(Ok(LineToken::Numbered)));
    }

    #[test]
    fn test_continuation_line() {
        assert_eq!(first("  :  AND DI[4]) ;"), Some(Ok(LineToken::Continuation)));
    }

    #[test]
    fn test_content_line_is_no_marker() {
        assert_eq!(first("OWNER = MNEDITOR;"), Some(Err(())));
        assert_eq!(first("P[1]{"), Some(Err(())));
    }

    #[test]
    fn test_blank_line_has_no_tokens() {
        assert_eq!(first("   "), None);
        assert_eq!(first(""), None);
    }
}
