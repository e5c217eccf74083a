//! Source-line scanning and continuation joining

use logos::Logos;

use super::tokens::LineToken;

/// Classification of a physical source line by its leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Program,
    Attributes,
    Application,
    Main,
    Positions,
    End,
    Numbered,
    Continuation,
    Content,
    Blank,
}

/// One physical line of source text.
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// 1-based physical line number.
    pub number: usize,
    /// Byte offset of the line start in the original source.
    pub offset: usize,
    /// Line text without the trailing newline.
    pub text: String,
    pub kind: LineKind,
}

/// Split source text into classified lines with byte offsets.
pub fn scan_lines(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (index, raw) in source.split('\n').enumerate() {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(SourceLine {
            number: index + 1,
            offset,
            text: text.to_string(),
            kind: classify(text),
        });
        offset += raw.len() + 1;
    }
    lines
}

fn classify(text: &str) -> LineKind {
    match LineToken::lexer(text).next() {
        None => LineKind::Blank,
        Some(Err(())) => LineKind::Content,
        Some(Ok(token)) => match token {
            LineToken::Program => LineKind::Program,
            LineToken::Attributes => LineKind::Attributes,
            LineToken::Application => LineKind::Application,
            LineToken::Main => LineKind::Main,
            LineToken::Positions => LineKind::Positions,
            LineToken::End => LineKind::End,
            LineToken::Numbered => LineKind::Numbered,
            LineToken::Continuation => LineKind::Continuation,
        },
    }
}

/// Join continuation lines onto their predecessors.
///
/// The continuation marker and the whitespace around it collapse to a
/// single space. The continuation line itself becomes a blank placeholder,
/// keeping every later line's physical number stable. A continuation with
/// no preceding joinable line is left untouched and rejected later by the
/// section grammar.
pub fn join_continuations(mut lines: Vec<SourceLine>) -> Vec<SourceLine> {
    let mut target: Option<usize> = None;
    for index in 0..lines.len() {
        match lines[index].kind {
            LineKind::Continuation => {
                let Some(previous) = target else { continue };
                let trimmed = lines[index].text.trim_start();
                let rest = match trimmed.strip_prefix(':') {
                    Some(rest) => rest.trim().to_string(),
                    None => continue,
                };
                let joined = format!("{} {}", lines[previous].text.trim_end(), rest);
                lines[previous].text = joined;
                lines[index].text = String::new();
                lines[index].kind = LineKind::Blank;
            }
            LineKind::Blank => {}
            _ => target = Some(index),
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_tracks_offsets_and_numbers() {
        let lines = scan_lines("/PROG A\n/MN\n   1:  J P[1] 100% FINE ;\n");
        assert_eq!(lines[0].kind, LineKind::Program);
        assert_eq!(lines[1].kind, LineKind::Main);
        assert_eq!(lines[1].offset, 8);
        assert_eq!(lines[2].kind, LineKind::Numbered);
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[3].kind, LineKind::Blank);
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let lines = scan_lines("/MN\r\n   1:  END ;\r\n");
        assert_eq!(lines[0].text, "/MN");
        assert_eq!(lines[1].text, "   1:  END ;");
        // Offsets still count the CR bytes.
        assert_eq!(lines[1].offset, 5);
    }

    #[test]
    fn test_continuation_joins_onto_previous_line() {
        let lines = scan(
            "   1:  IF (DI[1] AND DI[2]\n  :  AND DI[3]), JMP LBL[1] ;\n   2:  END ;\n",
        );
        assert_eq!(
            lines[0].text,
            "   1:  IF (DI[1] AND DI[2] AND DI[3]), JMP LBL[1] ;"
        );
        assert_eq!(lines[1].kind, LineKind::Blank);
        assert_eq!(lines[1].text, "");
        // Later lines keep their physical numbers.
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].kind, LineKind::Numbered);
    }

    #[test]
    fn test_consecutive_continuations_share_a_target() {
        let lines = scan("   1:  R[1]=1+2\n  :  +3\n  :  +4 ;\n");
        assert_eq!(lines[0].text, "   1:  R[1]=1+2 +3 +4 ;");
        assert_eq!(lines[1].kind, LineKind::Blank);
        assert_eq!(lines[2].kind, LineKind::Blank);
    }

    #[test]
    fn test_orphan_continuation_is_left_alone() {
        let lines = join_continuations(scan_lines("  :  AND DI[3] ;\n"));
        assert_eq!(lines[0].kind, LineKind::Continuation);
    }

    fn scan(source: &str) -> Vec<SourceLine> {
        join_continuations(scan_lines(source))
    }
}
