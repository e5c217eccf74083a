//! Addressing grammar
//!
//! Parses the contents of the `[...]` that follows a resource keyword
//! (`R`, `PR`, `SR`, `AR`, `LBL`, `F`, the I/O prefixes): an optional
//! `GP<n>:` group qualifier, then a direct index, an indirect `R[...]`
//! index, or a comma-separated pair, then an optional trailing inline
//! comment.
//!
//! The comment is the context-sensitive part. `R[1:note]` carries a
//! comment; `R[1:note]=5` must stop the comment before `]=5`. The comment
//! parser therefore only succeeds when a rewound lookahead past the
//! closing `]` finds something that may legally follow a register
//! reference; otherwise it fails and the access falls back to
//! "no comment".

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::combinators::{bracketed, inline_ws, unsigned_integer, ParserError};
use crate::tp::ast::{Access, IndexValue};

/// Words that may legally follow a register reference: operator words,
/// loop bounds, speed/termination/motion-option keywords, and the value
/// keyword prefixes. Checked after stripping glued trailing digits, so
/// `ACC100` and `CNT50` resolve to their stems.
static FOLLOW_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "AND", "OR", "DIV", "MOD", "TO", "DOWNTO", "THEN", "TIMEOUT", "WELD_SPEED", "FINE",
        "CNT", "CD", "sec", "msec", "mm", "cm", "inch", "deg", "WJNT", "ACC", "PTH", "AP_LD",
        "RT_LD", "BREAK", "Offset", "Tool_Offset", "ORNT_BASE", "RTCP", "Skip", "SkipJump",
        "TB", "TA", "DB", "Arc", "TA_REF", "COORD", "EV", "FPLIN", "INC", "ON", "OFF", "PULSE",
        "JMP", "CALL", "GP", "R", "PR", "P", "SR", "AR", "F", "DI", "DO", "RI", "RO", "GI",
        "GO", "AI", "AO", "SI", "SO", "UI", "UO", "TIMER",
    ]
    .into_iter()
    .collect()
});

fn follow_keyword() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|word, span| {
            let stem = word.trim_end_matches(|c: char| c.is_ascii_digit());
            if FOLLOW_KEYWORDS.contains(stem) || FOLLOW_KEYWORDS.contains(word.as_str()) {
                Ok(())
            } else {
                Err(Simple::custom(
                    span,
                    format!("`{}` cannot follow a register reference", word),
                ))
            }
        })
}

/// Anything that may legally come after a closed register reference: an
/// operator symbol, a closing/separating symbol, a value start, a legal
/// keyword, or the end of the line.
fn reference_follower() -> impl Parser<char, (), Error = ParserError> + Clone {
    choice((
        one_of("+-*/=<>!),;").ignored(),
        filter(|c: &char| c.is_ascii_digit()).ignored(),
        one_of("'$").ignored(),
        follow_keyword(),
        end(),
    ))
}

/// Trailing inline comment: `:` then anything up to the closing `]`,
/// accepted only when the lookahead past that `]` succeeds.
fn inline_comment() -> impl Parser<char, String, Error = ParserError> + Clone {
    just(':')
        .ignore_then(
            filter(|c: &char| *c != ']' && *c != '\n')
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .then_ignore(
            just(']')
                .ignore_then(inline_ws())
                .ignore_then(reference_follower())
                .rewind(),
        )
        .map(|text| text.trim().to_string())
}

fn with_group(access: Access, new_group: Option<u32>) -> Access {
    match access {
        Access::Direct { index, comment, .. } => Access::Direct {
            index,
            comment,
            group: new_group,
        },
        Access::Indirect { register, .. } => Access::Indirect {
            register,
            group: new_group,
        },
        Access::Multiple {
            index,
            item,
            comment,
            ..
        } => Access::Multiple {
            index,
            item,
            comment,
            group: new_group,
        },
    }
}

/// The access grammar. Most-specific first: the comma pair, then the
/// indirect register, then the direct index.
pub(crate) fn access() -> impl Parser<char, Access, Error = ParserError> + Clone {
    recursive(|access| {
        let register_reference = just('R').ignore_then(bracketed(access.clone()));

        let index_value = choice((
            unsigned_integer().map(IndexValue::Literal),
            register_reference
                .clone()
                .map(|register: Access| IndexValue::Register(Box::new(register))),
        ));

        let group = just("GP")
            .ignore_then(unsigned_integer())
            .then_ignore(just(':'))
            .then_ignore(inline_ws());

        let multiple = index_value
            .clone()
            .then_ignore(inline_ws().then(just(',')).then(inline_ws()))
            .then(index_value)
            .then(inline_comment().or_not())
            .map(|((index, item), comment)| Access::Multiple {
                index,
                item,
                comment,
                group: None,
            });

        let indirect = register_reference.map(|register: Access| Access::Indirect {
            register: Box::new(register),
            group: None,
        });

        let direct = unsigned_integer()
            .then(inline_comment().or_not())
            .map(|(index, comment)| Access::Direct {
                index,
                comment,
                group: None,
            });

        group
            .or_not()
            .then(choice((multiple, indirect, direct)))
            .map(|(group, access)| match group {
                Some(group) => with_group(access, Some(group)),
                None => access,
            })
    })
}

/// An integer-or-register index outside bracket contents (`AP_LD10`,
/// `AP_LDR[1]`).
pub(crate) fn index_value() -> impl Parser<char, IndexValue, Error = ParserError> + Clone {
    choice((
        unsigned_integer().map(IndexValue::Literal),
        just('R')
            .ignore_then(bracketed(access()))
            .map(|register| IndexValue::Register(Box::new(register))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::parser::combinators::bracketed;
    use proptest::prelude::*;

    fn parse(text: &str) -> Result<Access, Vec<ParserError>> {
        access().then_ignore(end()).parse(text)
    }

    #[test]
    fn test_direct() {
        assert_eq!(parse("5"), Ok(Access::direct(5)));
    }

    #[test]
    fn test_direct_with_comment_at_end_of_input() {
        // `R[1:note]` at the end of a line: follower is end-of-input.
        let parsed = bracketed(access())
            .then_ignore(end())
            .parse("[1:note]")
            .unwrap();
        assert_eq!(parsed.index(), Some(1));
        assert_eq!(parsed.comment(), Some("note"));
    }

    #[test]
    fn test_comment_lookahead_accepts_operator() {
        // The `=5` after the bracket is a legal follower.
        let parsed = bracketed(access()).parse("[1:Comment]=5").unwrap();
        assert_eq!(parsed.comment(), Some("Comment"));
    }

    #[test]
    fn test_comment_lookahead_rejects_bracket() {
        // A following `[` is not a legal follower, so the comment parser
        // must fail and the whole access with it: the `:note` is left
        // unconsumed and the closing bracket match fails.
        assert!(bracketed(access()).parse("[1:note][2]").is_err());
    }

    #[test]
    fn test_comment_with_spaces_and_keyword_follower() {
        let parsed = bracketed(access())
            .parse("[1:fail safe] FINE")
            .unwrap();
        assert_eq!(parsed.comment(), Some("fail safe"));
    }

    #[test]
    fn test_group_prefix() {
        let parsed = parse("GP2:7").unwrap();
        assert_eq!(parsed.index(), Some(7));
        assert_eq!(parsed.group(), Some(2));
    }

    #[test]
    fn test_indirect() {
        let parsed = parse("R[4]").unwrap();
        assert_eq!(
            parsed,
            Access::Indirect {
                register: Box::new(Access::direct(4)),
                group: None
            }
        );
    }

    #[test]
    fn test_multiple() {
        let parsed = parse("1,2").unwrap();
        assert_eq!(
            parsed,
            Access::Multiple {
                index: IndexValue::Literal(1),
                item: IndexValue::Literal(2),
                comment: None,
                group: None,
            }
        );
    }

    #[test]
    fn test_multiple_with_register_index() {
        let parsed = parse("R[3],2").unwrap();
        assert_eq!(
            parsed,
            Access::Multiple {
                index: IndexValue::Register(Box::new(Access::direct(3))),
                item: IndexValue::Literal(2),
                comment: None,
                group: None,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_direct_round_trip(n in 0u32..1_000_000) {
            let parsed = parse(&n.to_string()).unwrap();
            prop_assert_eq!(parsed, Access::direct(n));
        }
    }
}
