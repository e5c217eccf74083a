//! Motion instruction grammar
//!
//! `<type> <pos> [<pos2>] <speed> <termination> <option>*` — the motion
//! type letter must be followed by whitespace, which is what keeps `L` from
//! shadowing `LBL[...]` and `C` from shadowing `CALL` in the dispatcher.
//! Options are collected with a plain `repeated` loop into a source-ordered
//! list; the grammar never checks for duplicates.

use chumsky::prelude::*;

use super::access::{access, index_value};
use super::combinators::{
    bracketed, decimal, inline_ws, inline_ws1, keyword, unsigned_integer, ParserError,
};
use super::instructions::branching::{branch_action, label_reference};
use crate::tp::ast::{
    MotionInstruction, MotionOption, MotionType, PositionReference, Speed, SpeedUnit, Termination,
};

fn motion_type() -> impl Parser<char, MotionType, Error = ParserError> + Clone {
    choice((
        just('J').to(MotionType::Joint),
        just('L').to(MotionType::Linear),
        just('C').to(MotionType::Circular),
        just('A').to(MotionType::CircularArc),
        just('S').to(MotionType::Spline),
    ))
}

pub(crate) fn position_reference(
) -> impl Parser<char, PositionReference, Error = ParserError> + Clone {
    choice((
        just("PR")
            .ignore_then(bracketed(access()))
            .map(PositionReference::PositionRegister),
        just('P')
            .ignore_then(bracketed(access()))
            .map(PositionReference::Position),
    ))
}

fn speed_unit() -> impl Parser<char, SpeedUnit, Error = ParserError> + Clone {
    choice((
        just("mm/sec").to(SpeedUnit::MmPerSec),
        just("cm/min").to(SpeedUnit::CmPerMin),
        just("inch/min").to(SpeedUnit::InchPerMin),
        just("deg/sec").to(SpeedUnit::DegPerSec),
        just("msec").to(SpeedUnit::Milliseconds),
        just("sec").to(SpeedUnit::Seconds),
        just('%').to(SpeedUnit::Percent),
    ))
}

fn speed() -> impl Parser<char, Speed, Error = ParserError> + Clone {
    choice((
        keyword("WELD_SPEED").to(Speed::WeldSpeed),
        just('R')
            .ignore_then(bracketed(access()))
            .then(speed_unit().or_not())
            .map(|(access, unit)| Speed::Register { access, unit }),
        decimal()
            .then(speed_unit())
            .map(|(value, unit)| Speed::Literal { value, unit }),
    ))
}

fn termination() -> impl Parser<char, Termination, Error = ParserError> + Clone {
    choice((
        keyword("FINE").to(Termination::Fine),
        just("CNT")
            .ignore_then(inline_ws())
            .ignore_then(unsigned_integer())
            .map(Termination::Cnt),
        just("CD")
            .ignore_then(inline_ws())
            .ignore_then(unsigned_integer())
            .map(Termination::Cd),
    ))
}

/// `,PR[...]` tail of the offset options.
fn offset_register() -> impl Parser<char, crate::tp::ast::Access, Error = ParserError> + Clone {
    just(',')
        .ignore_then(inline_ws())
        .ignore_then(just("PR"))
        .ignore_then(bracketed(access()))
}

/// `<t>sec,<action>` / `<d>mm,<action>` tails of the TB/TA/DB options.
fn timed_action(
    unit: &'static str,
) -> impl Parser<char, (f64, crate::tp::ast::BranchAction), Error = ParserError> + Clone {
    inline_ws1()
        .ignore_then(decimal())
        .then_ignore(just(unit))
        .then_ignore(just(','))
        .then_ignore(inline_ws())
        .then(branch_action())
}

/// One motion option. Ordered most-specific first where prefixes overlap
/// (`SkipJump` before `Skip`, `TA_REF` before `TA`).
fn motion_option() -> impl Parser<char, MotionOption, Error = ParserError> + Clone {
    choice((
        keyword("WJNT").to(MotionOption::WristJoint),
        just("ACC")
            .ignore_then(unsigned_integer())
            .map(MotionOption::Acceleration),
        keyword("PTH").to(MotionOption::Path),
        just("AP_LD")
            .ignore_then(index_value())
            .map(MotionOption::ApproachLinearDistance),
        just("RT_LD")
            .ignore_then(index_value())
            .map(MotionOption::RetractLinearDistance),
        keyword("BREAK").to(MotionOption::Break),
        keyword("Tool_Offset")
            .ignore_then(offset_register().or_not())
            .map(MotionOption::ToolOffset),
        keyword("Offset")
            .ignore_then(offset_register().or_not())
            .map(MotionOption::Offset),
        keyword("ORNT_BASE").to(MotionOption::OrientBase),
        keyword("RTCP").to(MotionOption::RemoteTcp),
        keyword("SkipJump")
            .ignore_then(just(','))
            .ignore_then(inline_ws())
            .ignore_then(label_reference())
            .map(|label| MotionOption::SkipJump { label }),
        keyword("Skip")
            .ignore_then(just(','))
            .ignore_then(inline_ws())
            .ignore_then(label_reference())
            .map(|label| MotionOption::Skip { label }),
        keyword("TB")
            .ignore_then(timed_action("sec"))
            .map(|(seconds, action)| MotionOption::TimeBefore { seconds, action }),
        just("TA_REF")
            .ignore_then(bracketed(access()))
            .map(MotionOption::TorchAngleReference),
        keyword("TA")
            .ignore_then(timed_action("sec"))
            .map(|(seconds, action)| MotionOption::TimeAfter { seconds, action }),
        keyword("DB")
            .ignore_then(timed_action("mm"))
            .map(|(millimeters, action)| MotionOption::DistanceBefore {
                millimeters,
                action,
            }),
        just("Arc")
            .ignore_then(inline_ws1())
            .ignore_then(choice((
                just("Start").to(true),
                just("End").to(false),
            )))
            .then(bracketed(access()))
            .map(|(start, schedule)| {
                if start {
                    MotionOption::ArcStart(schedule)
                } else {
                    MotionOption::ArcEnd(schedule)
                }
            }),
        keyword("COORD").to(MotionOption::Coordinated),
        just("EV")
            .ignore_then(unsigned_integer())
            .then_ignore(just('%'))
            .map(MotionOption::ExtendedVelocity),
        keyword("FPLIN").to(MotionOption::FaceplateLinear),
        keyword("INC").to(MotionOption::Incremental),
    ))
}

pub(crate) fn motion_instruction(
) -> impl Parser<char, MotionInstruction, Error = ParserError> + Clone {
    motion_type()
        .then_ignore(inline_ws1())
        .then(position_reference())
        .then(inline_ws1().ignore_then(position_reference()).or_not())
        .then_ignore(inline_ws1())
        .then(speed())
        .then_ignore(inline_ws1())
        .then(termination())
        .then(inline_ws1().ignore_then(motion_option()).repeated())
        .try_map(
            |(((((motion_type, primary), secondary), speed), termination), options), span| {
                if motion_type.takes_second_position() && secondary.is_none() {
                    return Err(Simple::custom(
                        span,
                        format!(
                            "`{}` motion requires a second position",
                            motion_type.letter()
                        ),
                    ));
                }
                if !motion_type.takes_second_position() && secondary.is_some() {
                    return Err(Simple::custom(
                        span,
                        format!(
                            "`{}` motion takes a single position",
                            motion_type.letter()
                        ),
                    ));
                }
                Ok(MotionInstruction {
                    motion_type,
                    primary,
                    secondary,
                    speed,
                    termination,
                    options,
                })
            },
        )
}
