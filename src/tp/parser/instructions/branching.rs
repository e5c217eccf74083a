//! Branching family: labels, jumps, calls, IF forms and SELECT cases.

use chumsky::prelude::*;

use crate::tp::ast::{BranchAction, BranchingInstruction};
use crate::tp::parser::access::access;
use crate::tp::parser::combinators::{
    bracketed, identifier, inline_ws, inline_ws1, keyword, parenthesized, spaced, ParserError,
};
use crate::tp::parser::logic::mixed_logic_expression;
use crate::tp::parser::value::value;

/// `LBL[...]` reference.
pub(crate) fn label_reference() -> impl Parser<char, crate::tp::ast::Access, Error = ParserError> + Clone {
    just("LBL").ignore_then(bracketed(access()))
}

/// `CALL prog` / `CALL prog(arg, ...)`: the program name and arguments.
fn call_parts() -> impl Parser<char, (String, Vec<crate::tp::ast::Value>), Error = ParserError> + Clone
{
    keyword("CALL")
        .ignore_then(inline_ws1())
        .ignore_then(identifier())
        .then(
            parenthesized(value().separated_by(spaced(just(','))))
                .or_not(),
        )
        .map(|(program, arguments)| (program, arguments.unwrap_or_default()))
}

/// A call as an action payload.
pub(crate) fn call_action() -> impl Parser<char, BranchAction, Error = ParserError> + Clone {
    call_parts().map(|(program, arguments)| BranchAction::Call { program, arguments })
}

/// The action half of conditionals: `JMP LBL[n]` or a call.
pub(crate) fn branch_action() -> impl Parser<char, BranchAction, Error = ParserError> + Clone {
    choice((
        keyword("JMP")
            .ignore_then(inline_ws1())
            .ignore_then(label_reference())
            .map(BranchAction::Jump),
        call_action(),
    ))
}

pub(crate) fn branching_instruction(
) -> impl Parser<char, BranchingInstruction, Error = ParserError> + Clone {
    // `IF <cond>, <action>` — the comma form is tried before the THEN
    // block form; both parse the same expression prefix.
    let if_action = keyword("IF")
        .ignore_then(inline_ws1())
        .ignore_then(mixed_logic_expression())
        .then_ignore(spaced(just(',')))
        .then(branch_action())
        .map(|(condition, action)| BranchingInstruction::If { condition, action });

    let if_then = keyword("IF")
        .ignore_then(inline_ws1())
        .ignore_then(mixed_logic_expression())
        .then_ignore(inline_ws())
        .then_ignore(keyword("THEN"))
        .map(|condition| BranchingInstruction::IfThen { condition });

    let select = keyword("SELECT")
        .ignore_then(inline_ws1())
        .ignore_then(just('R').ignore_then(bracketed(access())))
        .then_ignore(spaced(just('=')))
        .then(value())
        .then_ignore(spaced(just(',')))
        .then(branch_action())
        .map(|((register, value), action)| BranchingInstruction::Select {
            register,
            value,
            action,
        });

    // Continuation lines of a SELECT block: `=<value>, <action>` and
    // `ELSE, <action>`. The ELSE arm must be tried before the bare ELSE
    // keyword below.
    let select_case = choice((
        just('=')
            .ignore_then(inline_ws())
            .ignore_then(value())
            .map(Some),
        keyword("ELSE").to(None),
    ))
    .then_ignore(spaced(just(',')))
    .then(branch_action())
    .map(|(value, action)| BranchingInstruction::SelectCase { value, action });

    let jump = keyword("JMP")
        .ignore_then(inline_ws1())
        .ignore_then(label_reference())
        .map(BranchingInstruction::Jump);

    let call = call_parts()
        .map(|(program, arguments)| BranchingInstruction::Call { program, arguments });

    let label = label_reference().map(BranchingInstruction::Label);

    choice((
        if_action,
        if_then,
        select,
        select_case,
        jump,
        call,
        label,
        keyword("ELSE").to(BranchingInstruction::Else),
        keyword("ENDIF").to(BranchingInstruction::EndIf),
    ))
}
