//! Arithmetic expression grammar
//!
//! Precedence here is grammar-structural, not climbed: the integer-family
//! binaries (`DIV`, `MOD`), the additive binaries and the multiplicative
//! binaries are each their own `value op expression` form, combined by
//! ordered alternation with the bare value last. Every binary's right side
//! recurses through the whole expression grammar, so trees lean right and
//! read left-to-right. `1+2*3` groups as `1+(2*3)` and `2*3+1` as
//! `2*(3+1)`; this matches the language, not mathematics, and must be
//! preserved as-is.

use chumsky::prelude::*;

use super::combinators::{inline_ws, keyword, ParserError};
use crate::tp::ast::{ArithmeticExpression, ArithmeticOperator, Value};

/// The arithmetic grammar over a caller-supplied value grammar. The value
/// grammar recurses back into this module for math-function arguments, so
/// the leaf parser is threaded in rather than constructed here.
pub(crate) fn expression_with(
    value: impl Parser<char, Value, Error = ParserError> + Clone + 'static,
) -> impl Parser<char, ArithmeticExpression, Error = ParserError> + Clone {
    recursive(|expression| {
        let integer_operator = choice((
            keyword("DIV").to(ArithmeticOperator::IntegerDivide),
            keyword("MOD").to(ArithmeticOperator::Modulus),
        ));
        let additive_operator = choice((
            just('+').to(ArithmeticOperator::Add),
            just('-').to(ArithmeticOperator::Subtract),
        ));
        let multiplicative_operator = choice((
            just('*').to(ArithmeticOperator::Multiply),
            just('/').to(ArithmeticOperator::Divide),
        ));

        let integer_binary = value
            .clone()
            .then_ignore(inline_ws())
            .then(integer_operator)
            .then_ignore(inline_ws())
            .then(expression.clone())
            .map(|((left, operator), right)| ArithmeticExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        let additive_binary = value
            .clone()
            .then_ignore(inline_ws())
            .then(additive_operator)
            .then_ignore(inline_ws())
            .then(expression.clone())
            .map(|((left, operator), right)| ArithmeticExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        let multiplicative_binary = value
            .clone()
            .then_ignore(inline_ws())
            .then(multiplicative_operator)
            .then_ignore(inline_ws())
            .then(expression)
            .map(|((left, operator), right)| ArithmeticExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        choice((
            integer_binary,
            additive_binary,
            multiplicative_binary,
            value.clone().map(ArithmeticExpression::Value),
        ))
    })
}

/// The standalone arithmetic expression grammar.
pub(crate) fn arithmetic_expression(
) -> impl Parser<char, ArithmeticExpression, Error = ParserError> + Clone {
    expression_with(super::value::value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(text: &str) -> Result<ArithmeticExpression, Vec<ParserError>> {
        arithmetic_expression().then_ignore(end()).parse(text)
    }

    fn binary(
        operator: ArithmeticOperator,
        left: Value,
        right: ArithmeticExpression,
    ) -> ArithmeticExpression {
        ArithmeticExpression::Binary {
            operator,
            left,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_single_value() {
        assert_eq!(parse("5"), Ok(ArithmeticExpression::Value(Value::Integer(5))));
    }

    #[test]
    fn test_addition_is_right_leaning() {
        assert_eq!(
            parse("1+2+3"),
            Ok(binary(
                ArithmeticOperator::Add,
                Value::Integer(1),
                binary(
                    ArithmeticOperator::Add,
                    Value::Integer(2),
                    ArithmeticExpression::Value(Value::Integer(3)),
                ),
            ))
        );
    }

    #[test]
    fn test_mixed_chain_groups_left_to_right_not_by_precedence() {
        // `1+2*3` happens to match mathematical grouping...
        assert_eq!(
            parse("1+2*3"),
            Ok(binary(
                ArithmeticOperator::Add,
                Value::Integer(1),
                binary(
                    ArithmeticOperator::Multiply,
                    Value::Integer(2),
                    ArithmeticExpression::Value(Value::Integer(3)),
                ),
            ))
        );
        // ...but `2*3+1` groups as `2*(3+1)`. The grammar reads
        // left-to-right; do not "fix" this to precedence climbing.
        assert_eq!(
            parse("2*3+1"),
            Ok(binary(
                ArithmeticOperator::Multiply,
                Value::Integer(2),
                binary(
                    ArithmeticOperator::Add,
                    Value::Integer(3),
                    ArithmeticExpression::Value(Value::Integer(1)),
                ),
            ))
        );
    }

    #[test]
    fn test_word_operators() {
        assert_eq!(
            parse("7 MOD 2"),
            Ok(binary(
                ArithmeticOperator::Modulus,
                Value::Integer(7),
                ArithmeticExpression::Value(Value::Integer(2)),
            ))
        );
        assert_eq!(
            parse("7 DIV 2"),
            Ok(binary(
                ArithmeticOperator::IntegerDivide,
                Value::Integer(7),
                ArithmeticExpression::Value(Value::Integer(2)),
            ))
        );
    }

    #[test]
    fn test_register_operands() {
        let parsed = parse("R[1]+R[2]").unwrap();
        match parsed {
            ArithmeticExpression::Binary { operator, left, .. } => {
                assert_eq!(operator, ArithmeticOperator::Add);
                assert!(matches!(left, Value::NumericRegister(_)));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    /// The left child of every binary node is a value leaf by
    /// construction; only right children recurse.
    fn assert_right_leaning(expression: &ArithmeticExpression) {
        if let ArithmeticExpression::Binary { right, .. } = expression {
            assert_right_leaning(right);
        }
    }

    proptest! {
        #[test]
        fn prop_chains_always_lean_right(
            values in proptest::collection::vec(0i64..100, 1..8),
            operators in proptest::collection::vec(0usize..4, 7),
        ) {
            let symbols = ["+", "-", "*", "/"];
            let mut text = values[0].to_string();
            for (value, op) in values.iter().skip(1).zip(operators.iter()) {
                text.push_str(symbols[*op]);
                text.push_str(&value.to_string());
            }
            let parsed = arithmetic_expression().then_ignore(end()).parse(text.as_str()).unwrap();
            assert_right_leaning(&parsed);
        }
    }
}
