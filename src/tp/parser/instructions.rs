//! Instruction dispatcher & line protocol
//!
//! Per line: a leading TP line number and colon, then one instruction
//! family, then the `;` terminator. The dispatcher is an explicit ordered
//! registry of family parsers; every alternative is wrapped in
//! `whole_line`, so an alternative only wins when it consumes the entire
//! line body. Ordering rules that matter:
//!
//! - motion first: the type letter plus mandatory whitespace is cheap to
//!   reject and never shadowed;
//! - the math family (parenthesized mixed-logic assignment) before the
//!   plain I/O and register assignment families;
//! - the macro instruction second-to-last — a bare identifier is a valid
//!   prefix of almost every other instruction;
//! - the empty instruction last, as the fold seed.

use chumsky::prelude::*;
use chumsky::BoxedParser;

pub(crate) mod branching;
pub(crate) mod control;
pub(crate) mod frames;
pub(crate) mod io;
pub(crate) mod loops;
pub(crate) mod misc;
pub(crate) mod monitor;
pub(crate) mod registers;
pub(crate) mod wait;
pub(crate) mod weld;

use super::combinators::{
    inline_ws, line_terminator, unsigned_integer, whole_line, ParserError,
};
use super::motion;
use crate::tp::ast::Instruction;

type FamilyParser = BoxedParser<'static, char, Instruction, ParserError>;

/// The ordered family registry. Declaration order is the dispatch order.
fn families() -> Vec<FamilyParser> {
    vec![
        motion::motion_instruction().map(Instruction::Motion).boxed(),
        loops::for_instruction().map(Instruction::ForLoop).boxed(),
        branching::branching_instruction()
            .map(Instruction::Branching)
            .boxed(),
        monitor::condition_monitor_instruction()
            .map(Instruction::ConditionMonitor)
            .boxed(),
        wait::skip_instruction().map(Instruction::Skip).boxed(),
        wait::wait_instruction().map(Instruction::Wait).boxed(),
        weld::weld_instruction().map(Instruction::Weld).boxed(),
        control::collision_guard_instruction()
            .map(Instruction::CollisionGuard)
            .boxed(),
        frames::offset_frame_instruction()
            .map(Instruction::OffsetFrame)
            .boxed(),
        control::multi_control_instruction()
            .map(Instruction::MultiControl)
            .boxed(),
        control::program_control_instruction()
            .map(Instruction::ProgramControl)
            .boxed(),
        registers::math_instruction().map(Instruction::Math).boxed(),
        io::io_instruction().map(Instruction::Io).boxed(),
        registers::register_instruction()
            .map(Instruction::Register)
            .boxed(),
        registers::position_register_instruction()
            .map(Instruction::PositionRegister)
            .boxed(),
        registers::string_register_instruction()
            .map(Instruction::StringRegister)
            .boxed(),
        misc::misc_instruction()
            .map(Instruction::Miscellaneous)
            .boxed(),
        misc::comment_instruction().map(Instruction::Comment).boxed(),
        misc::macro_instruction().map(Instruction::Macro).boxed(),
    ]
}

/// One instruction body, dispatched over the family registry.
pub(crate) fn instruction() -> impl Parser<char, Instruction, Error = ParserError> + Clone {
    families().into_iter().rev().fold(
        whole_line(misc::empty_instruction()).boxed(),
        |rest, family| whole_line(family).or(rest).boxed(),
    )
}

/// The full line protocol: `<n>: <instruction> ;`.
pub(crate) fn instruction_line(
) -> impl Parser<char, (u32, Instruction), Error = ParserError> + Clone {
    inline_ws()
        .ignore_then(unsigned_integer())
        .then_ignore(just(':'))
        .then_ignore(inline_ws())
        .then(instruction())
        .then_ignore(line_terminator())
}
