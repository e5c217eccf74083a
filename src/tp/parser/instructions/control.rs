//! Program-control, multi-task and collision-guard families.

use chumsky::prelude::*;

use crate::tp::ast::{
    CollisionGuardInstruction, MultiControlInstruction, ProgramControlInstruction,
};
use crate::tp::parser::combinators::{identifier, inline_ws1, keyword, ParserError};
use crate::tp::parser::value::value;

pub(crate) fn program_control_instruction(
) -> impl Parser<char, ProgramControlInstruction, Error = ParserError> + Clone {
    choice((
        keyword("PAUSE").to(ProgramControlInstruction::Pause),
        keyword("ABORT").to(ProgramControlInstruction::Abort),
        keyword("END").to(ProgramControlInstruction::End),
    ))
}

pub(crate) fn multi_control_instruction(
) -> impl Parser<char, MultiControlInstruction, Error = ParserError> + Clone {
    keyword("RUN")
        .ignore_then(inline_ws1())
        .ignore_then(identifier())
        .map(MultiControlInstruction::Run)
}

pub(crate) fn collision_guard_instruction(
) -> impl Parser<char, CollisionGuardInstruction, Error = ParserError> + Clone {
    keyword("COL").ignore_then(inline_ws1()).ignore_then(choice((
        keyword("DETECT")
            .ignore_then(inline_ws1())
            .ignore_then(choice((
                keyword("ON").to(CollisionGuardInstruction::DetectOn),
                keyword("OFF").to(CollisionGuardInstruction::DetectOff),
            ))),
        keyword("GUARD")
            .ignore_then(inline_ws1())
            .ignore_then(keyword("ADJUST"))
            .ignore_then(inline_ws1())
            .ignore_then(value())
            .map(CollisionGuardInstruction::GuardAdjust),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::Value;

    #[test]
    fn test_program_control_keywords() {
        let parse = |text: &str| {
            program_control_instruction()
                .then_ignore(end())
                .parse(text)
        };
        assert_eq!(parse("PAUSE"), Ok(ProgramControlInstruction::Pause));
        assert_eq!(parse("ABORT"), Ok(ProgramControlInstruction::Abort));
        assert_eq!(parse("END"), Ok(ProgramControlInstruction::End));
        // The boundary guard keeps `END` off the front of `ENDIF`.
        assert!(parse("ENDIF").is_err());
    }

    #[test]
    fn test_run() {
        assert_eq!(
            multi_control_instruction()
                .then_ignore(end())
                .parse("RUN FEEDER"),
            Ok(MultiControlInstruction::Run("FEEDER".to_string()))
        );
    }

    #[test]
    fn test_collision_guard() {
        let parse = |text: &str| {
            collision_guard_instruction()
                .then_ignore(end())
                .parse(text)
        };
        assert_eq!(parse("COL DETECT ON"), Ok(CollisionGuardInstruction::DetectOn));
        assert_eq!(parse("COL DETECT OFF"), Ok(CollisionGuardInstruction::DetectOff));
        assert_eq!(
            parse("COL GUARD ADJUST 50"),
            Ok(CollisionGuardInstruction::GuardAdjust(Value::Integer(50)))
        );
    }
}
