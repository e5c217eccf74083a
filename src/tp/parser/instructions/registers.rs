//! Register families: numeric, position and string register assignments,
//! and the mixed-logic ("math") assignment.
//!
//! The math form `<target>=(<expression>)` is dispatched before the plain
//! assignment families, so a parenthesized right-hand side always becomes
//! a `MixedLogicAssignment`; the expression stored is the one *inside* the
//! outer parentheses.

use chumsky::prelude::*;

use crate::tp::ast::{
    MixedLogicAssignment, PositionRegisterInstruction, RegisterAssignment,
    StringRegisterAssignment, Value,
};
use crate::tp::parser::access::access;
use crate::tp::parser::arithmetic::arithmetic_expression;
use crate::tp::parser::combinators::{
    bracketed, inline_ws1, keyword, parenthesized, spaced, ParserError,
};
use crate::tp::parser::logic::mixed_logic_expression;
use crate::tp::parser::value::value;

/// A mixed-logic assignment target: numeric register, flag, or port.
fn math_target() -> impl Parser<char, Value, Error = ParserError> + Clone {
    value().try_map(|target, span| match target {
        Value::NumericRegister(_) | Value::Flag(_) | Value::Port { .. } => Ok(target),
        other => Err(Simple::custom(
            span,
            format!("`{}` cannot hold a mixed-logic result", other),
        )),
    })
}

/// `<target>=(<mixed logic>)`
pub(crate) fn math_instruction(
) -> impl Parser<char, MixedLogicAssignment, Error = ParserError> + Clone {
    math_target()
        .then_ignore(spaced(just('=')))
        .then(parenthesized(mixed_logic_expression()))
        .map(|(target, expression)| MixedLogicAssignment { target, expression })
}

/// `R[...] = <arithmetic expression>`
pub(crate) fn register_instruction(
) -> impl Parser<char, RegisterAssignment, Error = ParserError> + Clone {
    just('R')
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(arithmetic_expression())
        .map(|(target, expression)| RegisterAssignment { target, expression })
}

/// `PR[...] = <arithmetic expression>`, `LOCK PREG`, `UNLOCK PREG`
pub(crate) fn position_register_instruction(
) -> impl Parser<char, PositionRegisterInstruction, Error = ParserError> + Clone {
    let assignment = just("PR")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(arithmetic_expression())
        .map(
            |(target, expression)| PositionRegisterInstruction::Assignment { target, expression },
        );

    choice((
        assignment,
        keyword("LOCK")
            .ignore_then(inline_ws1())
            .ignore_then(keyword("PREG"))
            .to(PositionRegisterInstruction::Lock),
        keyword("UNLOCK")
            .ignore_then(inline_ws1())
            .ignore_then(keyword("PREG"))
            .to(PositionRegisterInstruction::Unlock),
    ))
}

/// `SR[...] = <arithmetic expression>` — concatenation rides `+`.
pub(crate) fn string_register_instruction(
) -> impl Parser<char, StringRegisterAssignment, Error = ParserError> + Clone {
    just("SR")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(arithmetic_expression())
        .map(|(target, expression)| StringRegisterAssignment { target, expression })
}
