//! Expression trees
//!
//! Two expression languages share the `Value` leaves:
//!
//! - `ArithmeticExpression` — binary trees over values, right-associated by
//!   construction: each binary node's right child is a sub-expression, its
//!   left child always a value leaf. The shape mirrors left-to-right source
//!   reading order and is *not* mathematical precedence.
//! - `MixedLogicExpression` — the unified boolean/comparison/arithmetic
//!   grammar used in conditionals. The left side of a binary is always a
//!   `MixedLogicTerm`, never another binary; regrouping requires explicit
//!   parentheses.

use serde::Serialize;
use std::fmt;

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `DIV`
    IntegerDivide,
    /// `MOD`
    Modulus,
}

impl ArithmeticOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
            ArithmeticOperator::IntegerDivide => "DIV",
            ArithmeticOperator::Modulus => "MOD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArithmeticExpression {
    Value(Value),
    Binary {
        operator: ArithmeticOperator,
        left: Value,
        right: Box<ArithmeticExpression>,
    },
}

impl ArithmeticExpression {
    /// The value leaf, for the common single-value case.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ArithmeticExpression::Value(value) => Some(value),
            ArithmeticExpression::Binary { .. } => None,
        }
    }
}

impl fmt::Display for ArithmeticExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticExpression::Value(value) => write!(f, "{}", value),
            ArithmeticExpression::Binary {
                operator,
                left,
                right,
            } => match operator {
                ArithmeticOperator::IntegerDivide | ArithmeticOperator::Modulus => {
                    write!(f, "{} {} {}", left, operator.symbol(), right)
                }
                _ => write!(f, "{}{}{}", left, operator.symbol(), right),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MixedLogicOperator {
    Logical(LogicalOperator),
    Comparison(ComparisonOperator),
    Arithmetic(ArithmeticOperator),
}

impl MixedLogicOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            MixedLogicOperator::Logical(LogicalOperator::And) => "AND",
            MixedLogicOperator::Logical(LogicalOperator::Or) => "OR",
            MixedLogicOperator::Comparison(op) => op.symbol(),
            MixedLogicOperator::Arithmetic(op) => op.symbol(),
        }
    }
}

/// Left-hand side of a mixed-logic binary: a value, a negation, or a
/// parenthesized sub-expression. Never a binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MixedLogicTerm {
    Value(Value),
    Not(Box<MixedLogicTerm>),
    Parenthesized(Box<MixedLogicExpression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MixedLogicExpression {
    Term(MixedLogicTerm),
    Binary {
        operator: MixedLogicOperator,
        left: MixedLogicTerm,
        right: Box<MixedLogicExpression>,
    },
}

impl fmt::Display for MixedLogicTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixedLogicTerm::Value(value) => write!(f, "{}", value),
            MixedLogicTerm::Not(term) => write!(f, "!{}", term),
            MixedLogicTerm::Parenthesized(expression) => write!(f, "({})", expression),
        }
    }
}

impl fmt::Display for MixedLogicExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixedLogicExpression::Term(term) => write!(f, "{}", term),
            MixedLogicExpression::Binary {
                operator,
                left,
                right,
            } => {
                let spaced = matches!(
                    operator,
                    MixedLogicOperator::Logical(_)
                        | MixedLogicOperator::Arithmetic(ArithmeticOperator::IntegerDivide)
                        | MixedLogicOperator::Arithmetic(ArithmeticOperator::Modulus)
                );
                if spaced {
                    write!(f, "{} {} {}", left, operator.symbol(), right)
                } else {
                    write!(f, "{}{}{}", left, operator.symbol(), right)
                }
            }
        }
    }
}
