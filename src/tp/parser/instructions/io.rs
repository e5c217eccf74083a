//! I/O family: `<port or flag> = <value>`.
//!
//! Parenthesized right-hand sides never land here; the math family is
//! tried earlier in the dispatcher and claims them.

use chumsky::prelude::*;

use crate::tp::ast::IoAssignment;
use crate::tp::parser::combinators::{spaced, ParserError};
use crate::tp::parser::value::value;

/// An assignable I/O target: any port or a flag. Register targets belong
/// to the register families.
pub(crate) fn io_target() -> impl Parser<char, crate::tp::ast::Value, Error = ParserError> + Clone {
    value().try_map(|target, span| match target {
        crate::tp::ast::Value::Port { .. } | crate::tp::ast::Value::Flag(_) => Ok(target),
        other => Err(Simple::custom(
            span,
            format!("`{}` is not an I/O target", other),
        )),
    })
}

pub(crate) fn io_instruction() -> impl Parser<char, IoAssignment, Error = ParserError> + Clone {
    io_target()
        .then_ignore(spaced(just('=')))
        .then(value())
        .map(|(target, value)| IoAssignment { target, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::{Access, OnOff, PortDirection, PortKind, Value};

    fn parse(text: &str) -> Result<IoAssignment, Vec<ParserError>> {
        io_instruction().then_ignore(end()).parse(text)
    }

    #[test]
    fn test_digital_output_assignment() {
        let parsed = parse("DO[1]=ON").unwrap();
        assert_eq!(
            parsed.target,
            Value::Port {
                kind: PortKind::Digital,
                direction: PortDirection::Output,
                access: Access::direct(1)
            }
        );
        assert_eq!(parsed.value, Value::State(OnOff::On));
    }

    #[test]
    fn test_pulse_with_width() {
        let parsed = parse("DO[2]=PULSE,0.2sec").unwrap();
        assert_eq!(parsed.value, Value::Pulse { width: Some(0.2) });
    }

    #[test]
    fn test_analog_from_register() {
        let parsed = parse("AO[1]=R[3]").unwrap();
        assert_eq!(parsed.value, Value::NumericRegister(Access::direct(3)));
    }

    #[test]
    fn test_flag_target() {
        let parsed = parse("F[1]=OFF").unwrap();
        assert_eq!(parsed.target, Value::Flag(Access::direct(1)));
    }

    #[test]
    fn test_register_target_is_rejected() {
        assert!(parse("R[1]=ON").is_err());
    }
}
