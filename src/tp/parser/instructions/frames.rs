//! Offset/frame family: offset conditions and frame/tool selection.

use chumsky::prelude::*;

use crate::tp::ast::OffsetFrameInstruction;
use crate::tp::parser::access::access;
use crate::tp::parser::combinators::{bracketed, inline_ws1, keyword, spaced, ParserError};
use crate::tp::parser::value::value;

pub(crate) fn offset_frame_instruction(
) -> impl Parser<char, OffsetFrameInstruction, Error = ParserError> + Clone {
    let pr_reference = just("PR").ignore_then(bracketed(access()));

    let offset_condition = keyword("OFFSET")
        .ignore_then(inline_ws1())
        .ignore_then(keyword("CONDITION"))
        .ignore_then(inline_ws1())
        .ignore_then(pr_reference.clone())
        .map(OffsetFrameInstruction::OffsetCondition);

    let tool_offset_condition = keyword("TOOL_OFFSET")
        .ignore_then(inline_ws1())
        .ignore_then(keyword("CONDITION"))
        .ignore_then(inline_ws1())
        .ignore_then(pr_reference.clone())
        .map(OffsetFrameInstruction::ToolOffsetCondition);

    // `UFRAME_NUM` before `UFRAME[`: the bracketed form only matches once
    // the `_NUM` suffix has been ruled out.
    let uframe_num = just("UFRAME_NUM")
        .ignore_then(spaced(just('=')))
        .ignore_then(value())
        .map(OffsetFrameInstruction::UframeNum);

    let utool_num = just("UTOOL_NUM")
        .ignore_then(spaced(just('=')))
        .ignore_then(value())
        .map(OffsetFrameInstruction::UtoolNum);

    let uframe_assignment = just("UFRAME")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(pr_reference.clone())
        .map(|(frame, source)| OffsetFrameInstruction::UframeAssignment { frame, source });

    let utool_assignment = just("UTOOL")
        .ignore_then(bracketed(access()))
        .then_ignore(spaced(just('=')))
        .then(pr_reference)
        .map(|(tool, source)| OffsetFrameInstruction::UtoolAssignment { tool, source });

    choice((
        offset_condition,
        tool_offset_condition,
        uframe_num,
        utool_num,
        uframe_assignment,
        utool_assignment,
    ))
}
