//! Program assembly
//!
//! Splits the classified source lines into sections (`/PROG` header,
//! `/ATTR`, `/APPL`, `/MN`, `/POS`, `/END`), parses the line-oriented
//! header records with lazily compiled patterns, runs every `/MN` line
//! through the instruction dispatcher, and parses the `/POS` block with a
//! multi-line grammar. Section order is fixed; anything out of place is a
//! parse error at that line.

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

use super::api::{furthest_error, line_error};
use super::combinators::{quoted_string, unsigned_integer, ParserError};
use super::instructions::instruction_line;
use crate::tp::ast::{
    ApplicationEntry, Attribute, AttributeValue, AxisComponent, Header, PositionData,
    PositionEntry, PositionGroup, Program, SourceInstruction,
};
use crate::tp::error::ParseError;
use crate::tp::lexer::{self, LineKind, SourceLine};
use crate::tp::source::SourceMap;

/// `/PROG <name> [<sub-type>]`
static PROGRAM_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*/PROG\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s+(\S+))?\s*$").unwrap());

/// `KEY = value;` / `KEY: value;` attribute record, possibly spanning
/// multiple physical lines (`TCD:` blocks).
static ATTRIBUTE_RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*[=:]\s*(.*?)\s*;?\s*$").unwrap());

/// `KEY : value ;` / `KEY ;` application record.
static APPLICATION_RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*([^:;]+?)\s*(?::\s*(.*?))?\s*;?\s*$").unwrap());

struct Sections<'a> {
    program: &'a SourceLine,
    attributes: Vec<&'a SourceLine>,
    application: Option<Vec<&'a SourceLine>>,
    main: Vec<&'a SourceLine>,
    positions: Option<Vec<&'a SourceLine>>,
}

/// Parse one whole program. The single public entry point of this module.
pub(crate) fn assemble(source: &str) -> Result<Program, ParseError> {
    let lines = lexer::scan(source);
    let sections = split_sections(&lines)?;
    let header = parse_header(&sections)?;
    let instructions = parse_main(&sections.main)?;
    let positions = match &sections.positions {
        Some(lines) => parse_positions(lines)?,
        None => Vec::new(),
    };
    Ok(Program {
        header,
        instructions,
        positions,
    })
}

fn split_sections(lines: &[SourceLine]) -> Result<Sections<'_>, ParseError> {
    #[derive(PartialEq, Clone, Copy)]
    enum State {
        BeforeProgram,
        Header,
        Attributes,
        Application,
        Main,
        Positions,
        Done,
    }

    let mut state = State::BeforeProgram;
    let mut program: Option<&SourceLine> = None;
    let mut attributes = Vec::new();
    let mut application: Option<Vec<&SourceLine>> = None;
    let mut main: Option<Vec<&SourceLine>> = None;
    let mut positions: Option<Vec<&SourceLine>> = None;

    for line in lines {
        match line.kind {
            LineKind::Blank => continue,
            LineKind::Continuation => {
                return Err(ParseError::new(
                    line.number,
                    1,
                    "continuation line without a preceding instruction",
                ));
            }
            LineKind::Program => {
                if state != State::BeforeProgram {
                    return Err(ParseError::new(line.number, 1, "duplicate `/PROG` marker"));
                }
                program = Some(line);
                state = State::Header;
            }
            LineKind::Attributes => {
                if state != State::Header {
                    return Err(ParseError::new(line.number, 1, "unexpected `/ATTR` marker"));
                }
                state = State::Attributes;
            }
            LineKind::Application => {
                if !matches!(state, State::Header | State::Attributes) {
                    return Err(ParseError::new(line.number, 1, "unexpected `/APPL` marker"));
                }
                application = Some(Vec::new());
                state = State::Application;
            }
            LineKind::Main => {
                if !matches!(
                    state,
                    State::Header | State::Attributes | State::Application
                ) {
                    return Err(ParseError::new(line.number, 1, "unexpected `/MN` marker"));
                }
                main = Some(Vec::new());
                state = State::Main;
            }
            LineKind::Positions => {
                if state != State::Main {
                    return Err(ParseError::new(line.number, 1, "unexpected `/POS` marker"));
                }
                positions = Some(Vec::new());
                state = State::Positions;
            }
            LineKind::End => {
                if !matches!(state, State::Main | State::Positions) {
                    return Err(ParseError::new(line.number, 1, "unexpected `/END` marker"));
                }
                state = State::Done;
            }
            LineKind::Numbered | LineKind::Content => match state {
                State::Attributes => attributes.push(line),
                State::Application => {
                    if let Some(entries) = application.as_mut() {
                        entries.push(line);
                    }
                }
                State::Main => {
                    if let Some(entries) = main.as_mut() {
                        entries.push(line);
                    }
                }
                State::Positions => {
                    if let Some(entries) = positions.as_mut() {
                        entries.push(line);
                    }
                }
                State::Done => {
                    return Err(ParseError::new(line.number, 1, "content after `/END`"));
                }
                State::BeforeProgram => {
                    return Err(ParseError::new(
                        line.number,
                        1,
                        "expected `/PROG` at the start of the program",
                    ));
                }
                State::Header => {
                    return Err(ParseError::new(
                        line.number,
                        1,
                        "expected a section marker after `/PROG`",
                    ));
                }
            },
        }
    }

    let Some(program) = program else {
        return Err(ParseError::new(1, 1, "missing `/PROG` marker"));
    };
    let Some(main) = main else {
        return Err(ParseError::new(lines.len().max(1), 1, "missing `/MN` section"));
    };
    if state != State::Done {
        return Err(ParseError::new(lines.len().max(1), 1, "missing `/END` marker"));
    }

    Ok(Sections {
        program,
        attributes,
        application,
        main,
        positions,
    })
}

fn parse_header(sections: &Sections<'_>) -> Result<Header, ParseError> {
    let program = sections.program;
    let captures = PROGRAM_LINE.captures(&program.text).ok_or_else(|| {
        ParseError::new(program.number, 1, "malformed `/PROG` line")
    })?;
    let name = captures[1].to_string();
    let sub_type = captures.get(2).map(|m| m.as_str().to_string());

    let attributes = parse_attributes(&sections.attributes)?;
    let application = match &sections.application {
        Some(lines) => Some(parse_application(lines)?),
        None => None,
    };

    Ok(Header {
        name,
        sub_type,
        attributes,
        application,
    })
}

/// Group a section's lines into `;`-terminated records. Returns each
/// record's text and the line number it starts on.
fn collect_records(lines: &[&SourceLine]) -> Vec<(String, usize)> {
    let mut records = Vec::new();
    let mut buffer = String::new();
    let mut start = 0;
    for line in lines {
        if buffer.is_empty() {
            start = line.number;
        } else {
            buffer.push('\n');
        }
        buffer.push_str(&line.text);
        if line.text.trim_end().ends_with(';') {
            records.push((std::mem::take(&mut buffer), start));
        }
    }
    if !buffer.is_empty() {
        records.push((buffer, start));
    }
    records
}

fn parse_attributes(lines: &[&SourceLine]) -> Result<Vec<Attribute>, ParseError> {
    let mut attributes = Vec::new();
    for (record, line) in collect_records(lines) {
        let captures = ATTRIBUTE_RECORD.captures(&record).ok_or_else(|| {
            ParseError::new(line, 1, "malformed attribute record")
        })?;
        let key = captures[1].to_string();
        let raw = captures[2].trim().to_string();
        let value = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            AttributeValue::Str(raw[1..raw.len() - 1].to_string())
        } else if let Ok(number) = raw.parse::<i64>() {
            AttributeValue::Integer(number)
        } else {
            AttributeValue::Raw(raw)
        };
        attributes.push(Attribute { key, value });
    }
    Ok(attributes)
}

fn parse_application(lines: &[&SourceLine]) -> Result<Vec<ApplicationEntry>, ParseError> {
    let mut entries = Vec::new();
    for (record, line) in collect_records(lines) {
        let captures = APPLICATION_RECORD.captures(&record).ok_or_else(|| {
            ParseError::new(line, 1, "malformed application record")
        })?;
        entries.push(ApplicationEntry {
            key: captures[1].trim().to_string(),
            value: captures
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        });
    }
    Ok(entries)
}

fn parse_main(lines: &[&SourceLine]) -> Result<Vec<SourceInstruction>, ParseError> {
    let parser = instruction_line();
    let mut instructions = Vec::new();
    for line in lines {
        match line.kind {
            LineKind::Numbered => match parser.parse(line.text.as_str()) {
                Ok((number, instruction)) => instructions.push(SourceInstruction {
                    line: line.number,
                    number,
                    instruction,
                }),
                Err(errors) => return Err(line_error(line.number, &errors)),
            },
            _ => {
                return Err(ParseError::new(
                    line.number,
                    1,
                    "expected a numbered instruction line",
                ));
            }
        }
    }
    Ok(instructions)
}

fn parse_positions(lines: &[&SourceLine]) -> Result<Vec<PositionEntry>, ParseError> {
    let text = lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let base = lines.first().map(|line| line.number).unwrap_or(1);

    match position_entries().parse(text.as_str()) {
        Ok(entries) => Ok(entries),
        Err(errors) => {
            let map = SourceMap::new(&text);
            match furthest_error(&errors) {
                Some((offset, message)) => {
                    let (relative_line, column) = map.position(offset);
                    Err(ParseError::new(base + relative_line - 1, column, message))
                }
                None => Err(ParseError::new(base, 1, "malformed position table")),
            }
        }
    }
}

/// Whitespace including newlines; the `/POS` grammar is the one grammar
/// that spans physical lines.
fn ws() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace()).repeated().ignored()
}

/// `<AXIS> = <value> [mm|deg]`
fn axis_component() -> impl Parser<char, AxisComponent, Error = ParserError> + Clone {
    let axis = filter(|c: &char| c.is_ascii_uppercase())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .then(
            filter(|c: &char| c.is_ascii_digit())
                .repeated()
                .collect::<String>(),
        )
        .map(|(letters, digits)| format!("{}{}", letters, digits));

    let unit = ws()
        .ignore_then(choice((just("mm").to("mm"), just("deg").to("deg"))))
        .map(|unit: &str| unit.to_string());

    axis.then_ignore(ws())
        .then_ignore(just('='))
        .then_ignore(ws())
        .then(super::combinators::decimal())
        .then(unit.or_not())
        .map(|((axis, value), unit)| AxisComponent { axis, value, unit })
}

fn build_position_data(
    components: Vec<AxisComponent>,
    span: std::ops::Range<usize>,
) -> Result<PositionData, ParserError> {
    let joint = components
        .first()
        .map(|component| component.axis.starts_with('J'))
        .unwrap_or(false);

    if joint {
        if let Some(stray) = components.iter().find(|c| !c.axis.starts_with('J')) {
            return Err(Simple::custom(
                span,
                format!("`{}` mixed into a joint position", stray.axis),
            ));
        }
        return Ok(PositionData::Joint { axes: components });
    }

    let expected = ["X", "Y", "Z", "W", "P", "R"];
    if components.len() < expected.len() {
        return Err(Simple::custom(span, "incomplete Cartesian position"));
    }
    for (component, name) in components.iter().zip(expected.iter()) {
        if component.axis != *name {
            return Err(Simple::custom(
                span.clone(),
                format!("expected `{}` component, found `{}`", name, component.axis),
            ));
        }
    }
    let mut values = components;
    let external = values.split_off(expected.len());
    if let Some(stray) = external.iter().find(|c| !c.axis.starts_with('E')) {
        return Err(Simple::custom(
            span,
            format!("`{}` is not an external axis", stray.axis),
        ));
    }
    Ok(PositionData::Cartesian {
        x: values[0].value,
        y: values[1].value,
        z: values[2].value,
        w: values[3].value,
        p: values[4].value,
        r: values[5].value,
        external,
    })
}

/// `GP<g>: UF : <n>, UT : <n> [, CONFIG : '<chars>'], <components>`
fn position_group() -> impl Parser<char, PositionGroup, Error = ParserError> + Clone {
    let config = ws()
        .ignore_then(just(','))
        .ignore_then(ws())
        .ignore_then(just("CONFIG"))
        .ignore_then(ws())
        .ignore_then(just(':'))
        .ignore_then(ws())
        .ignore_then(quoted_string('\''));

    just("GP")
        .ignore_then(unsigned_integer())
        .then_ignore(just(':'))
        .then_ignore(ws())
        .then_ignore(just("UF"))
        .then_ignore(ws())
        .then_ignore(just(':'))
        .then_ignore(ws())
        .then(unsigned_integer())
        .then_ignore(ws())
        .then_ignore(just(','))
        .then_ignore(ws())
        .then_ignore(just("UT"))
        .then_ignore(ws())
        .then_ignore(just(':'))
        .then_ignore(ws())
        .then(unsigned_integer())
        .then(config.or_not())
        .then_ignore(ws())
        .then_ignore(just(','))
        .then_ignore(ws())
        .then(
            axis_component()
                .separated_by(ws().then(just(',')).then(ws()))
                .at_least(1),
        )
        .try_map(
            |((((group, user_frame), user_tool), configuration), components), span| {
                Ok(PositionGroup {
                    group,
                    user_frame,
                    user_tool,
                    configuration,
                    data: build_position_data(components, span)?,
                })
            },
        )
}

/// `P[<n>[:"comment"]]{ <groups> };`
fn position_entry() -> impl Parser<char, PositionEntry, Error = ParserError> + Clone {
    just('P')
        .ignore_then(just('['))
        .ignore_then(unsigned_integer())
        .then(just(':').ignore_then(quoted_string('"')).or_not())
        .then_ignore(just(']'))
        .then_ignore(ws())
        .then_ignore(just('{'))
        .then_ignore(ws())
        .then(position_group().then_ignore(ws()).repeated().at_least(1))
        .then_ignore(just('}'))
        .then_ignore(ws())
        .then_ignore(just(';'))
        .map(|((index, comment), groups)| PositionEntry {
            index,
            comment,
            groups,
        })
}

fn position_entries() -> impl Parser<char, Vec<PositionEntry>, Error = ParserError> + Clone {
    ws().ignore_then(position_entry().then_ignore(ws()).repeated())
        .then_ignore(end())
}
