//! Mixed-logic expression grammar
//!
//! The unified boolean/comparison/arithmetic expression used by `IF (...)`,
//! `WAIT (...)`, `SKIP CONDITION` and mixed-logic assignments:
//!
//! ```text
//! Term       := Value | '!' Term | '(' Expression ')'
//! Expression := Term LogicalOp Expression
//!             | Term ComparisonOp Expression
//!             | Term ArithmeticOp Expression
//!             | Term
//! ```
//!
//! `Expression` appears on the right of every binary rule and `Term` only
//! re-enters `Expression` through parentheses; both rules are built inside
//! `recursive` thunks so the circular reference is resolved lazily instead
//! of recursing at construction time. Each binary alternative parses a
//! fresh `Term` for its left side, so a failed higher-priority alternative
//! cleanly resets the cursor. Grouping is purely left-to-right; there is
//! no precedence among the operator families beyond the try order.

use chumsky::prelude::*;

use super::combinators::{inline_ws, keyword, parenthesized, ParserError};
use super::value::value;
use crate::tp::ast::{
    ArithmeticOperator, ComparisonOperator, LogicalOperator, MixedLogicExpression,
    MixedLogicOperator, MixedLogicTerm,
};

fn logical_operator() -> impl Parser<char, MixedLogicOperator, Error = ParserError> + Clone {
    choice((
        keyword("AND").to(LogicalOperator::And),
        keyword("OR").to(LogicalOperator::Or),
    ))
    .map(MixedLogicOperator::Logical)
}

fn comparison_operator() -> impl Parser<char, MixedLogicOperator, Error = ParserError> + Clone {
    choice((
        just("<>").to(ComparisonOperator::NotEqual),
        just("<=").to(ComparisonOperator::LessOrEqual),
        just(">=").to(ComparisonOperator::GreaterOrEqual),
        just('<').to(ComparisonOperator::Less),
        just('>').to(ComparisonOperator::Greater),
        just('=').to(ComparisonOperator::Equal),
    ))
    .map(MixedLogicOperator::Comparison)
}

fn arithmetic_operator() -> impl Parser<char, MixedLogicOperator, Error = ParserError> + Clone {
    choice((
        keyword("DIV").to(ArithmeticOperator::IntegerDivide),
        keyword("MOD").to(ArithmeticOperator::Modulus),
        just('+').to(ArithmeticOperator::Add),
        just('-').to(ArithmeticOperator::Subtract),
        just('*').to(ArithmeticOperator::Multiply),
        just('/').to(ArithmeticOperator::Divide),
    ))
    .map(MixedLogicOperator::Arithmetic)
}

pub(crate) fn mixed_logic_expression(
) -> impl Parser<char, MixedLogicExpression, Error = ParserError> + Clone {
    recursive(|expression| {
        let term = recursive(|term| {
            choice((
                just('!')
                    .ignore_then(inline_ws())
                    .ignore_then(term)
                    .map(|inner| MixedLogicTerm::Not(Box::new(inner))),
                parenthesized(expression.clone())
                    .map(|inner| MixedLogicTerm::Parenthesized(Box::new(inner))),
                value().map(MixedLogicTerm::Value),
            ))
        });

        let logical_binary = term
            .clone()
            .then_ignore(inline_ws())
            .then(logical_operator())
            .then_ignore(inline_ws())
            .then(expression.clone())
            .map(|((left, operator), right)| MixedLogicExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        let comparison_binary = term
            .clone()
            .then_ignore(inline_ws())
            .then(comparison_operator())
            .then_ignore(inline_ws())
            .then(expression.clone())
            .map(|((left, operator), right)| MixedLogicExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        let arithmetic_binary = term
            .clone()
            .then_ignore(inline_ws())
            .then(arithmetic_operator())
            .then_ignore(inline_ws())
            .then(expression)
            .map(|((left, operator), right)| MixedLogicExpression::Binary {
                operator,
                left,
                right: Box::new(right),
            });

        choice((
            logical_binary,
            comparison_binary,
            arithmetic_binary,
            term.map(MixedLogicExpression::Term),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::{Access, Value};

    fn parse(text: &str) -> Result<MixedLogicExpression, Vec<ParserError>> {
        mixed_logic_expression().then_ignore(end()).parse(text)
    }

    fn port(n: u32) -> MixedLogicTerm {
        MixedLogicTerm::Value(Value::Port {
            kind: crate::tp::ast::PortKind::Digital,
            direction: crate::tp::ast::PortDirection::Input,
            access: Access::direct(n),
        })
    }

    #[test]
    fn test_bare_term() {
        assert_eq!(
            parse("DI[1]"),
            Ok(MixedLogicExpression::Term(port(1)))
        );
    }

    #[test]
    fn test_left_side_is_always_a_term() {
        let parsed = parse("DI[1] AND DI[2] AND DI[3]").unwrap();
        // The outer binary's left operand is a bare term; the chain nests
        // to the right.
        match parsed {
            MixedLogicExpression::Binary {
                operator,
                left,
                right,
            } => {
                assert_eq!(
                    operator,
                    MixedLogicOperator::Logical(LogicalOperator::And)
                );
                assert_eq!(left, port(1));
                assert!(matches!(
                    *right,
                    MixedLogicExpression::Binary { .. }
                ));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_comparison() {
        let parsed = parse("R[1]>0").unwrap();
        match parsed {
            MixedLogicExpression::Binary { operator, left, right } => {
                assert_eq!(
                    operator,
                    MixedLogicOperator::Comparison(ComparisonOperator::Greater)
                );
                assert_eq!(
                    left,
                    MixedLogicTerm::Value(Value::NumericRegister(Access::direct(1)))
                );
                assert_eq!(
                    *right,
                    MixedLogicExpression::Term(MixedLogicTerm::Value(Value::Integer(0)))
                );
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_negation_and_parentheses() {
        let parsed = parse("!(DI[1] OR DI[2])").unwrap();
        match parsed {
            MixedLogicExpression::Term(MixedLogicTerm::Not(inner)) => {
                assert!(matches!(*inner, MixedLogicTerm::Parenthesized(_)));
            }
            other => panic!("expected negated term, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_left_side() {
        // Explicit parentheses are the only way to regroup.
        let parsed = parse("(DI[1] OR DI[2]) AND DI[3]").unwrap();
        match parsed {
            MixedLogicExpression::Binary { left, .. } => {
                assert!(matches!(left, MixedLogicTerm::Parenthesized(_)));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_comparison_and_logic() {
        // Left-to-right grouping: `R[1]=1 AND DI[2]` parses as
        // `R[1] = (1 AND DI[2])`.
        let parsed = parse("R[1]=1 AND DI[2]").unwrap();
        match parsed {
            MixedLogicExpression::Binary { operator, right, .. } => {
                assert_eq!(
                    operator,
                    MixedLogicOperator::Comparison(ComparisonOperator::Equal)
                );
                assert!(matches!(*right, MixedLogicExpression::Binary { .. }));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_arithmetic_inside_logic() {
        let parsed = parse("R[1]+1>5").unwrap();
        // Tried in order: logical fails, comparison fails at `+`... the
        // arithmetic binary wins with `R[1] + (1>5)`.
        match parsed {
            MixedLogicExpression::Binary { operator, .. } => {
                assert_eq!(
                    operator,
                    MixedLogicOperator::Arithmetic(ArithmeticOperator::Add)
                );
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }
}
