//! Condition-monitor family: `MONITOR`, `MONITOR END` and `WHEN` lines.

use chumsky::prelude::*;

use crate::tp::ast::ConditionMonitorInstruction;
use crate::tp::parser::combinators::{identifier, inline_ws1, keyword, spaced, ParserError};
use crate::tp::parser::instructions::branching::branch_action;
use crate::tp::parser::logic::mixed_logic_expression;

pub(crate) fn condition_monitor_instruction(
) -> impl Parser<char, ConditionMonitorInstruction, Error = ParserError> + Clone {
    let monitor = keyword("MONITOR")
        .ignore_then(inline_ws1())
        .ignore_then(choice((
            keyword("END")
                .ignore_then(inline_ws1())
                .ignore_then(identifier())
                .map(ConditionMonitorInstruction::End),
            identifier().map(ConditionMonitorInstruction::Start),
        )));

    let when = keyword("WHEN")
        .ignore_then(inline_ws1())
        .ignore_then(mixed_logic_expression())
        .then_ignore(spaced(just(',')))
        .then(branch_action())
        .map(|(condition, action)| ConditionMonitorInstruction::When { condition, action });

    choice((monitor, when))
}
