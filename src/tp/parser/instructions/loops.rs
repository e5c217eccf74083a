//! FOR-loop family.

use chumsky::prelude::*;

use crate::tp::ast::{ForDirection, ForInstruction};
use crate::tp::parser::access::access;
use crate::tp::parser::combinators::{bracketed, inline_ws1, keyword, spaced, ParserError};
use crate::tp::parser::value::value;

pub(crate) fn for_instruction() -> impl Parser<char, ForInstruction, Error = ParserError> + Clone {
    let header = keyword("FOR")
        .ignore_then(inline_ws1())
        .ignore_then(just('R').ignore_then(bracketed(access())))
        .then_ignore(spaced(just('=')))
        .then(value())
        .then_ignore(inline_ws1())
        .then(choice((
            keyword("DOWNTO").to(ForDirection::DownTo),
            keyword("TO").to(ForDirection::To),
        )))
        .then_ignore(inline_ws1())
        .then(value())
        .map(|(((register, from), direction), to)| ForInstruction::For {
            register,
            from,
            direction,
            to,
        });

    choice((keyword("ENDFOR").to(ForInstruction::EndFor), header))
}
