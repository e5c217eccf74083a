//! Weld/weave family.

use chumsky::prelude::*;

use crate::tp::ast::{WeavePattern, WeldInstruction};
use crate::tp::parser::access::access;
use crate::tp::parser::combinators::{bracketed, inline_ws1, ParserError};

pub(crate) fn weld_instruction() -> impl Parser<char, WeldInstruction, Error = ParserError> + Clone
{
    let weld = just("Weld").ignore_then(inline_ws1()).ignore_then(choice((
        just("Start")
            .ignore_then(bracketed(access()))
            .map(WeldInstruction::WeldStart),
        just("End")
            .ignore_then(bracketed(access()))
            .map(WeldInstruction::WeldEnd),
    )));

    let weave = just("Weave").ignore_then(inline_ws1()).ignore_then(choice((
        just("End").to(WeldInstruction::WeaveEnd),
        choice((
            just("Sine").to(WeavePattern::Sine),
            just("Circle").to(WeavePattern::Circle),
            just("Figure8").to(WeavePattern::Figure8),
        ))
        .then(bracketed(access()).or_not())
        .map(|(pattern, schedule)| WeldInstruction::Weave { pattern, schedule }),
    )));

    choice((weld, weave))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tp::ast::{Access, IndexValue};

    fn parse(text: &str) -> Result<WeldInstruction, Vec<ParserError>> {
        weld_instruction().then_ignore(end()).parse(text)
    }

    #[test]
    fn test_weld_start_with_schedule_pair() {
        assert_eq!(
            parse("Weld Start[1,1]"),
            Ok(WeldInstruction::WeldStart(Access::Multiple {
                index: IndexValue::Literal(1),
                item: IndexValue::Literal(1),
                comment: None,
                group: None,
            }))
        );
    }

    #[test]
    fn test_weld_end() {
        assert_eq!(
            parse("Weld End[1,2]"),
            Ok(WeldInstruction::WeldEnd(Access::Multiple {
                index: IndexValue::Literal(1),
                item: IndexValue::Literal(2),
                comment: None,
                group: None,
            }))
        );
    }

    #[test]
    fn test_weave_patterns() {
        assert_eq!(
            parse("Weave Sine[1]"),
            Ok(WeldInstruction::Weave {
                pattern: WeavePattern::Sine,
                schedule: Some(Access::direct(1)),
            })
        );
        assert_eq!(
            parse("Weave Circle"),
            Ok(WeldInstruction::Weave {
                pattern: WeavePattern::Circle,
                schedule: None,
            })
        );
        assert_eq!(parse("Weave End"), Ok(WeldInstruction::WeaveEnd));
    }
}
