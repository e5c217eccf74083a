//! Wait and skip families.
//!
//! `WAIT R[1]` is a duration and `WAIT R[1]=ON` a condition; the duration
//! alternative is guarded by the ensure-line-consumed lookahead, so it only
//! wins when nothing but the terminator follows the value.

use chumsky::prelude::*;

use crate::tp::ast::{SkipCondition, WaitInstruction};
use crate::tp::parser::combinators::{inline_ws, inline_ws1, keyword, whole_line, ParserError};
use crate::tp::parser::instructions::branching::label_reference;
use crate::tp::parser::logic::mixed_logic_expression;
use crate::tp::parser::value::value;

pub(crate) fn wait_instruction() -> impl Parser<char, WaitInstruction, Error = ParserError> + Clone
{
    let duration = keyword("WAIT")
        .ignore_then(inline_ws1())
        .ignore_then(value())
        .then_ignore(just("(sec)").or_not())
        .map(WaitInstruction::Duration);

    let timeout = inline_ws1()
        .ignore_then(keyword("TIMEOUT"))
        .ignore_then(just(','))
        .ignore_then(inline_ws())
        .ignore_then(label_reference());

    let condition = keyword("WAIT")
        .ignore_then(inline_ws1())
        .ignore_then(mixed_logic_expression())
        .then(timeout.or_not())
        .map(|(condition, timeout_label)| WaitInstruction::Condition {
            condition,
            timeout_label,
        });

    choice((whole_line(duration), condition))
}

pub(crate) fn skip_instruction() -> impl Parser<char, SkipCondition, Error = ParserError> + Clone {
    keyword("SKIP")
        .ignore_then(inline_ws1())
        .ignore_then(keyword("CONDITION"))
        .ignore_then(inline_ws1())
        .ignore_then(mixed_logic_expression())
        .map(|condition| SkipCondition { condition })
}
