//! Parser combinator helpers shared by the TP grammars.

use chumsky::prelude::*;

/// Type alias for the internal parser error
pub(crate) type ParserError = Simple<char>;

/// Inline whitespace: spaces and tabs, never newlines.
pub(crate) fn inline_ws() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(" \t").repeated().ignored()
}

/// At least one space or tab.
pub(crate) fn inline_ws1() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Wrap a parser in optional inline whitespace on both sides.
pub(crate) fn spaced<T>(
    parser: impl Parser<char, T, Error = ParserError> + Clone,
) -> impl Parser<char, T, Error = ParserError> + Clone {
    inline_ws().ignore_then(parser).then_ignore(inline_ws())
}

/// An unsigned integer literal.
pub(crate) fn unsigned_integer() -> impl Parser<char, u32, Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits, span| {
            digits
                .parse::<u32>()
                .map_err(|_| Simple::custom(span, format!("integer out of range `{}`", digits)))
        })
}

/// A signed integer literal.
pub(crate) fn signed_integer() -> impl Parser<char, i64, Error = ParserError> + Clone {
    just('-')
        .or_not()
        .then(
            filter(|c: &char| c.is_ascii_digit())
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .try_map(|(sign, digits), span| {
            let text = match sign {
                Some(_) => format!("-{}", digits),
                None => digits,
            };
            text.parse::<i64>()
                .map_err(|_| Simple::custom(span, format!("integer out of range `{}`", text)))
        })
}

/// A decimal literal: `12`, `12.5`, `.5`, `-3.`, all parsed as `f64`.
pub(crate) fn decimal() -> impl Parser<char, f64, Error = ParserError> + Clone {
    let digits = || {
        filter(|c: &char| c.is_ascii_digit())
            .repeated()
            .at_least(1)
            .collect::<String>()
    };
    let with_whole = digits()
        .then(
            just('.')
                .ignore_then(
                    filter(|c: &char| c.is_ascii_digit())
                        .repeated()
                        .collect::<String>(),
                )
                .or_not(),
        )
        .map(|(whole, fraction)| match fraction {
            Some(fraction) => format!("{}.{}", whole, fraction),
            None => whole,
        });
    let bare_fraction = just('.')
        .ignore_then(digits())
        .map(|fraction| format!("0.{}", fraction));

    just('-')
        .or_not()
        .then(with_whole.or(bare_fraction))
        .try_map(|(sign, body), span| {
            let text = match sign {
                Some(_) => format!("-{}", body),
                None => body,
            };
            text.parse::<f64>()
                .map_err(|_| Simple::custom(span, format!("malformed number `{}`", text)))
        })
}

/// A keyword with a word-boundary guard: the next character must not
/// continue the word. `keyword("END")` therefore never matches the front
/// of `ENDIF`. Glued forms like `CNT100` use bare `just` instead.
pub(crate) fn keyword(word: &'static str) -> impl Parser<char, &'static str, Error = ParserError> + Clone {
    just(word)
        .then(
            filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .rewind()
                .or_not(),
        )
        .try_map(move |(_, next), span| match next {
            Some(_) => Err(Simple::custom(span, format!("expected keyword `{}`", word))),
            None => Ok(word),
        })
}

/// A TP identifier (program names): letter or underscore, then letters,
/// digits and underscores.
pub(crate) fn identifier() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated()
                .collect::<String>(),
        )
        .map(|(first, rest)| format!("{}{}", first, rest))
}

/// Content between two `quote` characters; no escapes, no newlines.
pub(crate) fn quoted_string(quote: char) -> impl Parser<char, String, Error = ParserError> + Clone {
    just(quote)
        .ignore_then(
            filter(move |c: &char| *c != quote && *c != '\n')
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just(quote))
}

/// `[` ... `]` wrapping with inline padding.
pub(crate) fn bracketed<T>(
    parser: impl Parser<char, T, Error = ParserError> + Clone,
) -> impl Parser<char, T, Error = ParserError> + Clone {
    just('[')
        .ignore_then(spaced(parser))
        .then_ignore(just(']'))
}

/// `(` ... `)` wrapping with inline padding.
pub(crate) fn parenthesized<T>(
    parser: impl Parser<char, T, Error = ParserError> + Clone,
) -> impl Parser<char, T, Error = ParserError> + Clone {
    just('(')
        .ignore_then(spaced(parser))
        .then_ignore(just(')'))
}

/// The line terminator: optional whitespace and `//` trailing remark, the
/// `;`, trailing whitespace, end of line.
pub(crate) fn line_terminator() -> impl Parser<char, (), Error = ParserError> + Clone {
    inline_ws()
        .then(
            just("//")
                .then(filter(|c: &char| *c != ';' && *c != '\n').repeated())
                .or_not(),
        )
        .then(just(';'))
        .then(inline_ws())
        .then(end())
        .ignored()
}

/// The ensure-line-consumed wrapper.
///
/// Succeeds only when `parser` leaves the cursor exactly at the line
/// terminator; the terminator itself is checked with a rewound lookahead
/// and left for the line protocol to consume. Wrapping every dispatcher
/// alternative individually is what stops a textually shorter alternative
/// from claiming a line that belongs to a later-tried family.
pub(crate) fn whole_line<T>(
    parser: impl Parser<char, T, Error = ParserError> + Clone,
) -> impl Parser<char, T, Error = ParserError> + Clone {
    parser.then_ignore(line_terminator().rewind())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_respects_word_boundary() {
        assert_eq!(keyword("END").parse("END"), Ok("END"));
        assert!(keyword("END").parse("ENDIF").is_err());
        // Non-word characters terminate a keyword.
        assert_eq!(keyword("END").then_ignore(just(' ')).parse("END ;"), Ok("END"));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(decimal().parse("12"), Ok(12.0));
        assert_eq!(decimal().parse("12.5"), Ok(12.5));
        assert_eq!(decimal().parse(".5"), Ok(0.5));
        assert_eq!(decimal().parse("-3."), Ok(-3.0));
    }

    #[test]
    fn test_unsigned_integer_rejects_overflow() {
        assert!(unsigned_integer().parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_line_terminator_allows_trailing_remark() {
        assert!(line_terminator().parse("  ;").is_ok());
        assert!(line_terminator().parse(" // remark ;  ").is_ok());
        assert!(line_terminator().parse("  x ;").is_err());
    }

    #[test]
    fn test_whole_line_rejects_unconsumed_input() {
        let parser = whole_line(keyword("PAUSE")).then_ignore(line_terminator());
        assert!(parser.parse("PAUSE ;").is_ok());
        assert!(parser.parse("PAUSE extra ;").is_err());
    }
}
