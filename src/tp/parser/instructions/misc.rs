//! Miscellaneous family (RSR, alarms, timers, override, parameter writes,
//! messages, payload) plus the comment, macro and empty instructions.

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::tp::ast::{EnableDisable, Instruction, MiscInstruction, TimerAction};
use crate::tp::parser::access::access;
use crate::tp::parser::combinators::{
    bracketed, identifier, inline_ws, keyword, spaced, ParserError,
};
use crate::tp::parser::value::{parameter_path, value};

/// Words that open other instruction families and therefore can never be
/// macro program names. An incomplete `SELECT` must stay a parse failure
/// instead of degrading into a macro call.
static RESERVED_MACRO_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "IF", "SELECT", "WAIT", "SKIP", "CALL", "JMP", "LBL", "FOR", "ENDFOR", "ELSE",
        "ENDIF", "END", "PAUSE", "ABORT", "RUN", "MONITOR", "WHEN", "COL", "OVERRIDE",
        "MESSAGE", "PAYLOAD", "LOCK", "UNLOCK", "TIMER", "RSR", "UALM", "Weld", "Weave",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn misc_instruction() -> impl Parser<char, MiscInstruction, Error = ParserError> + Clone
{
    let rsr = just("RSR")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(choice((
            keyword("ENABLE").to(EnableDisable::Enable),
            keyword("DISABLE").to(EnableDisable::Disable),
        )))
        .map(|(access, state)| MiscInstruction::Rsr { access, state });

    let user_alarm = just("UALM")
        .ignore_then(bracketed(access()))
        .map(MiscInstruction::UserAlarm);

    let timer = just("TIMER")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(choice((
            keyword("START").to(TimerAction::Start),
            keyword("STOP").to(TimerAction::Stop),
            keyword("RESET").to(TimerAction::Reset),
        )))
        .map(|(access, action)| MiscInstruction::Timer { access, action });

    let override_speed = keyword("OVERRIDE")
        .ignore_then(spaced(just('=')))
        .ignore_then(value())
        .then_ignore(just('%'))
        .map(MiscInstruction::Override);

    let parameter_write = parameter_path()
        .then_ignore(spaced(just('=')))
        .then(value())
        .map(|(parameter, value)| MiscInstruction::ParameterAssignment { parameter, value });

    let message = keyword("MESSAGE")
        .ignore_then(just('['))
        .ignore_then(
            filter(|c: &char| *c != ']' && *c != '\n')
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just(']'))
        .map(|text| MiscInstruction::Message(text.trim().to_string()));

    let payload = keyword("PAYLOAD")
        .ignore_then(bracketed(access()))
        .map(MiscInstruction::Payload);

    choice((
        rsr,
        user_alarm,
        timer,
        override_speed,
        parameter_write,
        message,
        payload,
    ))
}

/// `!text` and `//text` comment lines.
pub(crate) fn comment_instruction() -> impl Parser<char, String, Error = ParserError> + Clone {
    choice((just("!").ignored(), just("//").ignored()))
        .ignore_then(
            filter(|c: &char| *c != ';' && *c != '\n')
                .repeated()
                .collect::<String>(),
        )
        .map(|text| text.trim().to_string())
}

/// A bare program identifier: a subroutine-style macro call. A valid
/// prefix of almost every other instruction, so the dispatcher tries it
/// second-to-last, and family-opening keywords are rejected outright.
pub(crate) fn macro_instruction() -> impl Parser<char, String, Error = ParserError> + Clone {
    identifier().try_map(|name, span| {
        if RESERVED_MACRO_WORDS.contains(name.as_str()) {
            Err(Simple::custom(
                span,
                format!("`{}` is a reserved word", name),
            ))
        } else {
            Ok(name)
        }
    })
}

/// Whitespace-only line body; the dispatcher's final fallback.
pub(crate) fn empty_instruction() -> impl Parser<char, Instruction, Error = ParserError> + Clone {
    inline_ws().to(Instruction::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::{Access, ParameterPath, ParameterSegment, Value};

    fn parse(text: &str) -> Result<MiscInstruction, Vec<ParserError>> {
        misc_instruction().then_ignore(end()).parse(text)
    }

    #[test]
    fn test_rsr_and_alarm() {
        assert_eq!(
            parse("RSR[1]=ENABLE"),
            Ok(MiscInstruction::Rsr {
                access: Access::direct(1),
                state: EnableDisable::Enable,
            })
        );
        assert_eq!(
            parse("UALM[3]"),
            Ok(MiscInstruction::UserAlarm(Access::direct(3)))
        );
    }

    #[test]
    fn test_timer_actions() {
        assert_eq!(
            parse("TIMER[1]=START"),
            Ok(MiscInstruction::Timer {
                access: Access::direct(1),
                action: TimerAction::Start,
            })
        );
        assert_eq!(
            parse("TIMER[1]=RESET"),
            Ok(MiscInstruction::Timer {
                access: Access::direct(1),
                action: TimerAction::Reset,
            })
        );
    }

    #[test]
    fn test_override() {
        assert_eq!(
            parse("OVERRIDE=50%"),
            Ok(MiscInstruction::Override(Value::Integer(50)))
        );
    }

    #[test]
    fn test_parameter_write() {
        assert_eq!(
            parse("$WAITTMOUT=200"),
            Ok(MiscInstruction::ParameterAssignment {
                parameter: ParameterPath {
                    program: None,
                    segments: vec![ParameterSegment::Field("WAITTMOUT".to_string())],
                },
                value: Value::Integer(200),
            })
        );
    }

    #[test]
    fn test_message_and_payload() {
        assert_eq!(
            parse("MESSAGE[CYCLE DONE]"),
            Ok(MiscInstruction::Message("CYCLE DONE".to_string()))
        );
        assert_eq!(
            parse("PAYLOAD[2]"),
            Ok(MiscInstruction::Payload(Access::direct(2)))
        );
    }

    #[test]
    fn test_comment_forms() {
        let parse = |text: &str| comment_instruction().then_ignore(end()).parse(text);
        assert_eq!(parse("! approach the fixture "), Ok("approach the fixture".to_string()));
        assert_eq!(parse("// unused"), Ok("unused".to_string()));
    }
}
