//! Public API for the parser.
//!
//! Chumsky's internal errors never cross the crate boundary: the furthest
//! failure of a parse is mapped to a single `ParseError` with a 1-based
//! position, which the diagnostics layer of an editor can surface as-is.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use super::combinators::ParserError;
use super::instructions::instruction_line;
use super::program;
use crate::tp::ast::{Program, SourceInstruction};
use crate::tp::error::ParseError;

/// Parse one complete TP program.
///
/// The single parsing boundary the editor tooling consumes: full text in,
/// `Program` or one positioned error out. Stateless and synchronous;
/// independent documents may be parsed concurrently.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    program::assemble(source)
}

/// Parse a single numbered instruction line (`  1:  J P[1] 100% FINE ;`).
///
/// The reported position treats the input as line 1.
pub fn parse_instruction(line: &str) -> Result<SourceInstruction, ParseError> {
    match instruction_line().parse(line) {
        Ok((number, instruction)) => Ok(SourceInstruction {
            line: 1,
            number,
            instruction,
        }),
        Err(errors) => Err(line_error(1, &errors)),
    }
}

/// The furthest-reached failure of an error set: its byte offset and
/// message. By alternation convention this is the most useful single
/// diagnostic: ordered alternatives report whatever the deepest attempt
/// saw.
pub(crate) fn furthest_error(errors: &[ParserError]) -> Option<(usize, String)> {
    errors
        .iter()
        .max_by_key(|error| error.span().start)
        .map(|error| (error.span().start, describe(error)))
}

/// Map an error set from a single-line parse to a `ParseError` on that
/// line; the column is the furthest-reached offset.
pub(crate) fn line_error(line: usize, errors: &[ParserError]) -> ParseError {
    match furthest_error(errors) {
        Some((offset, message)) => ParseError::new(line, offset + 1, message),
        None => ParseError::new(line, 1, "parse failed"),
    }
}

fn describe(error: &ParserError) -> String {
    match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        _ => match error.found() {
            Some(found) => format!("unexpected `{}`", found),
            None => "unexpected end of line".to_string(),
        },
    }
}
