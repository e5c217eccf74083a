//! Value grammar
//!
//! Every `Value` variant opens with a distinguishing keyword or symbol, so
//! the grammar is one ordered alternation. Two-letter port/register
//! keywords come before the one-letter families; the bracket that every
//! keyword family requires makes the remaining prefixes unambiguous.

use chumsky::prelude::*;

use super::access::access;
use super::arithmetic;
use super::combinators::{
    bracketed, decimal, identifier, inline_ws, keyword, quoted_string, signed_integer, spaced,
    ParserError,
};
use crate::tp::ast::{
    MathFunction, OnOff, ParameterPath, ParameterSegment, PortDirection, PortKind, Value,
};

/// A float literal: a decimal with a mandatory point, so plain integers
/// fall through to the integer alternative.
fn float_literal() -> impl Parser<char, f64, Error = ParserError> + Clone {
    let digits = || {
        filter(|c: &char| c.is_ascii_digit())
            .repeated()
            .at_least(1)
            .collect::<String>()
    };
    let body = choice((
        digits()
            .then_ignore(just('.'))
            .then(
                filter(|c: &char| c.is_ascii_digit())
                    .repeated()
                    .collect::<String>(),
            )
            .map(|(whole, fraction)| format!("{}.{}", whole, fraction)),
        just('.')
            .ignore_then(digits())
            .map(|fraction| format!("0.{}", fraction)),
    ));
    just('-')
        .or_not()
        .then(body)
        .try_map(|(sign, body), span| {
            let text = match sign {
                Some(_) => format!("-{}", body),
                None => body,
            };
            text.parse::<f64>()
                .map_err(|_| Simple::custom(span, format!("malformed number `{}`", text)))
        })
}

fn state() -> impl Parser<char, Value, Error = ParserError> + Clone {
    choice((
        keyword("ON").to(OnOff::On),
        keyword("OFF").to(OnOff::Off),
    ))
    .map(Value::State)
}

/// `PULSE` / `PULSE,0.5sec`
fn pulse() -> impl Parser<char, Value, Error = ParserError> + Clone {
    keyword("PULSE")
        .ignore_then(
            just(',')
                .ignore_then(inline_ws())
                .ignore_then(decimal())
                .then_ignore(just("sec"))
                .or_not(),
        )
        .map(|width| Value::Pulse { width })
}

fn port() -> impl Parser<char, Value, Error = ParserError> + Clone {
    use PortDirection::{Input, Output};
    use PortKind::{Analog, Digital, Group, Robot, Sop, Uop};
    choice((
        just("DI").to((Digital, Input)),
        just("DO").to((Digital, Output)),
        just("RI").to((Robot, Input)),
        just("RO").to((Robot, Output)),
        just("GI").to((Group, Input)),
        just("GO").to((Group, Output)),
        just("AI").to((Analog, Input)),
        just("AO").to((Analog, Output)),
        just("SI").to((Sop, Input)),
        just("SO").to((Sop, Output)),
        just("UI").to((Uop, Input)),
        just("UO").to((Uop, Output)),
    ))
    .then(bracketed(access()))
    .map(|((kind, direction), access)| Value::Port {
        kind,
        direction,
        access,
    })
}

fn math_function_name() -> impl Parser<char, MathFunction, Error = ParserError> + Clone {
    choice((
        keyword("SQRT").to(MathFunction::Sqrt),
        keyword("ASIN").to(MathFunction::Asin),
        keyword("ACOS").to(MathFunction::Acos),
        keyword("ATAN").to(MathFunction::Atan),
        keyword("ABS").to(MathFunction::Abs),
        keyword("SIN").to(MathFunction::Sin),
        keyword("COS").to(MathFunction::Cos),
        keyword("TAN").to(MathFunction::Tan),
        keyword("LN").to(MathFunction::Ln),
        keyword("EXP").to(MathFunction::Exp),
        keyword("TRUNC").to(MathFunction::Trunc),
        keyword("ROUND").to(MathFunction::Round),
    ))
}

/// `$SCR_GRP[1].$M_POS_ENB`, `$[PROGNAME]VAR`, `$SPEED` — a leading `$`,
/// an optional Karel program qualifier, then dotted fields and bracketed
/// index lists.
pub(crate) fn parameter_path() -> impl Parser<char, ParameterPath, Error = ParserError> + Clone {
    let name = filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>();
    let field = just('$')
        .or_not()
        .ignore_then(name)
        .map(ParameterSegment::Field);
    let indices = bracketed(
        signed_integer()
            .separated_by(spaced(just(',')))
            .at_least(1),
    )
    .map(ParameterSegment::Index);

    just('$')
        .ignore_then(bracketed(identifier()).or_not())
        .then(field.clone())
        .then(choice((just('.').ignore_then(field), indices)).repeated())
        .map(|((program, first), rest)| {
            let mut segments = vec![first];
            segments.extend(rest);
            ParameterPath { program, segments }
        })
}

/// The value grammar. The function-argument sub-grammar recurses back into
/// arithmetic expressions over this same value grammar, hence the
/// `recursive` construction.
pub(crate) fn value() -> impl Parser<char, Value, Error = ParserError> + Clone {
    recursive(|value| {
        let expression = arithmetic::expression_with(value);

        choice((
            quoted_string('\'').map(Value::Str),
            float_literal().map(Value::Float),
            signed_integer().map(Value::Integer),
            pulse(),
            state(),
            port(),
            math_function_name()
                .then(bracketed(expression))
                .map(|(function, argument)| Value::Function {
                    function,
                    argument: Box::new(argument),
                }),
            just("TIMER").ignore_then(bracketed(access())).map(Value::Timer),
            just("PR")
                .ignore_then(bracketed(access()))
                .map(Value::PositionRegister),
            just("SR")
                .ignore_then(bracketed(access()))
                .map(Value::StringRegister),
            just("AR")
                .ignore_then(bracketed(access()))
                .map(Value::ArgumentRegister),
            just('R')
                .ignore_then(bracketed(access()))
                .map(Value::NumericRegister),
            just('P').ignore_then(bracketed(access())).map(Value::Position),
            just('F').ignore_then(bracketed(access())).map(Value::Flag),
            parameter_path().map(Value::Parameter),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::Access;
    use rstest::rstest;

    fn parse(text: &str) -> Result<Value, Vec<ParserError>> {
        value().then_ignore(end()).parse(text)
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse("42"), Ok(Value::Integer(42)));
        assert_eq!(parse("-7"), Ok(Value::Integer(-7)));
        assert_eq!(parse("3.25"), Ok(Value::Float(3.25)));
        assert_eq!(parse("'abc'"), Ok(Value::Str("abc".to_string())));
    }

    #[rstest]
    #[case("DI[1]", PortKind::Digital, PortDirection::Input)]
    #[case("DO[1]", PortKind::Digital, PortDirection::Output)]
    #[case("RI[1]", PortKind::Robot, PortDirection::Input)]
    #[case("RO[1]", PortKind::Robot, PortDirection::Output)]
    #[case("GI[1]", PortKind::Group, PortDirection::Input)]
    #[case("GO[1]", PortKind::Group, PortDirection::Output)]
    #[case("AI[1]", PortKind::Analog, PortDirection::Input)]
    #[case("AO[1]", PortKind::Analog, PortDirection::Output)]
    #[case("SI[1]", PortKind::Sop, PortDirection::Input)]
    #[case("SO[1]", PortKind::Sop, PortDirection::Output)]
    #[case("UI[1]", PortKind::Uop, PortDirection::Input)]
    #[case("UO[1]", PortKind::Uop, PortDirection::Output)]
    fn test_ports(#[case] text: &str, #[case] kind: PortKind, #[case] direction: PortDirection) {
        assert_eq!(
            parse(text),
            Ok(Value::Port {
                kind,
                direction,
                access: Access::direct(1)
            })
        );
    }

    #[test]
    fn test_registers() {
        assert_eq!(parse("R[1]"), Ok(Value::NumericRegister(Access::direct(1))));
        assert_eq!(parse("PR[2]"), Ok(Value::PositionRegister(Access::direct(2))));
        assert_eq!(parse("SR[3]"), Ok(Value::StringRegister(Access::direct(3))));
        assert_eq!(parse("AR[4]"), Ok(Value::ArgumentRegister(Access::direct(4))));
        assert_eq!(parse("P[5]"), Ok(Value::Position(Access::direct(5))));
        assert_eq!(parse("F[6]"), Ok(Value::Flag(Access::direct(6))));
        assert_eq!(parse("TIMER[7]"), Ok(Value::Timer(Access::direct(7))));
    }

    #[test]
    fn test_indirect_register() {
        assert_eq!(
            parse("R[R[2]]"),
            Ok(Value::NumericRegister(Access::Indirect {
                register: Box::new(Access::direct(2)),
                group: None
            }))
        );
    }

    #[test]
    fn test_states_and_pulse() {
        assert_eq!(parse("ON"), Ok(Value::State(OnOff::On)));
        assert_eq!(parse("OFF"), Ok(Value::State(OnOff::Off)));
        assert_eq!(parse("PULSE"), Ok(Value::Pulse { width: None }));
        assert_eq!(parse("PULSE,0.5sec"), Ok(Value::Pulse { width: Some(0.5) }));
    }

    #[test]
    fn test_math_function_takes_expression_argument() {
        let parsed = parse("SQRT[R[1]+1]").unwrap();
        match parsed {
            Value::Function { function, argument } => {
                assert_eq!(function, MathFunction::Sqrt);
                assert!(matches!(
                    *argument,
                    crate::tp::ast::ArithmeticExpression::Binary { .. }
                ));
            }
            other => panic!("expected function value, got {:?}", other),
        }
    }

    #[test]
    fn test_round_is_not_mistaken_for_register() {
        assert!(matches!(parse("ROUND[2]"), Ok(Value::Function { .. })));
    }

    #[test]
    fn test_parameter_paths() {
        let parsed = parse("$SCR_GRP[1].$M_POS_ENB").unwrap();
        assert_eq!(
            parsed,
            Value::Parameter(ParameterPath {
                program: None,
                segments: vec![
                    ParameterSegment::Field("SCR_GRP".to_string()),
                    ParameterSegment::Index(vec![1]),
                    ParameterSegment::Field("M_POS_ENB".to_string()),
                ],
            })
        );

        let parsed = parse("$[TOOLING]COUNT").unwrap();
        assert_eq!(
            parsed,
            Value::Parameter(ParameterPath {
                program: Some("TOOLING".to_string()),
                segments: vec![ParameterSegment::Field("COUNT".to_string())],
            })
        );
    }
}
