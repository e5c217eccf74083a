//! Values
//!
//! `Value` is the closed union at the leaves of every expression. Each
//! variant is structurally distinguishable by its leading keyword or
//! symbol, which is what lets the value grammar dispatch through ordered
//! alternatives without unbounded backtracking.

use serde::Serialize;
use std::fmt;

use super::access::Access;
use super::expression::ArithmeticExpression;

/// Physical I/O port families, each existing as input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortKind {
    /// `DI`/`DO`
    Digital,
    /// `RI`/`RO`
    Robot,
    /// `GI`/`GO`
    Group,
    /// `AI`/`AO`
    Analog,
    /// `SI`/`SO` — standard operator panel
    Sop,
    /// `UI`/`UO` — user operator panel
    Uop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnOff {
    On,
    Off,
}

/// Built-in math functions, `SQRT[...]` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MathFunction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Abs,
    Ln,
    Exp,
    Trunc,
    Round,
}

impl MathFunction {
    pub fn keyword(&self) -> &'static str {
        match self {
            MathFunction::Sqrt => "SQRT",
            MathFunction::Sin => "SIN",
            MathFunction::Cos => "COS",
            MathFunction::Tan => "TAN",
            MathFunction::Asin => "ASIN",
            MathFunction::Acos => "ACOS",
            MathFunction::Atan => "ATAN",
            MathFunction::Abs => "ABS",
            MathFunction::Ln => "LN",
            MathFunction::Exp => "EXP",
            MathFunction::Trunc => "TRUNC",
            MathFunction::Round => "ROUND",
        }
    }
}

/// One step of a system/Karel parameter path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterSegment {
    /// A named field, `$`-prefix stripped: `SCR_GRP`, `M_POS_ENB`.
    Field(String),
    /// A bracketed index list: `[1]`, `[1,2]`.
    Index(Vec<i64>),
}

/// A dotted/bracketed parameter reference such as `$SCR_GRP[1].$M_POS_ENB`
/// or `$[PROGNAME]VAR`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterPath {
    /// Karel program qualifier from the `$[name]` form.
    pub program: Option<String>,
    pub segments: Vec<ParameterSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
    /// `R[...]`
    NumericRegister(Access),
    /// `PR[...]`
    PositionRegister(Access),
    /// `SR[...]`
    StringRegister(Access),
    /// `AR[...]`
    ArgumentRegister(Access),
    /// `P[...]`
    Position(Access),
    Port {
        kind: PortKind,
        direction: PortDirection,
        access: Access,
    },
    /// `F[...]`
    Flag(Access),
    /// `TIMER[...]`
    Timer(Access),
    State(OnOff),
    /// `PULSE` with an optional width in seconds: `PULSE,0.5sec`.
    Pulse {
        width: Option<f64>,
    },
    Function {
        function: MathFunction,
        argument: Box<ArithmeticExpression>,
    },
    Parameter(ParameterPath),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Str(text) => write!(f, "'{}'", text),
            Value::NumericRegister(access) => write!(f, "R[{}]", access),
            Value::PositionRegister(access) => write!(f, "PR[{}]", access),
            Value::StringRegister(access) => write!(f, "SR[{}]", access),
            Value::ArgumentRegister(access) => write!(f, "AR[{}]", access),
            Value::Position(access) => write!(f, "P[{}]", access),
            Value::Port {
                kind,
                direction,
                access,
            } => {
                let keyword = match (kind, direction) {
                    (PortKind::Digital, PortDirection::Input) => "DI",
                    (PortKind::Digital, PortDirection::Output) => "DO",
                    (PortKind::Robot, PortDirection::Input) => "RI",
                    (PortKind::Robot, PortDirection::Output) => "RO",
                    (PortKind::Group, PortDirection::Input) => "GI",
                    (PortKind::Group, PortDirection::Output) => "GO",
                    (PortKind::Analog, PortDirection::Input) => "AI",
                    (PortKind::Analog, PortDirection::Output) => "AO",
                    (PortKind::Sop, PortDirection::Input) => "SI",
                    (PortKind::Sop, PortDirection::Output) => "SO",
                    (PortKind::Uop, PortDirection::Input) => "UI",
                    (PortKind::Uop, PortDirection::Output) => "UO",
                };
                write!(f, "{}[{}]", keyword, access)
            }
            Value::Flag(access) => write!(f, "F[{}]", access),
            Value::Timer(access) => write!(f, "TIMER[{}]", access),
            Value::State(OnOff::On) => write!(f, "ON"),
            Value::State(OnOff::Off) => write!(f, "OFF"),
            Value::Pulse { width: None } => write!(f, "PULSE"),
            Value::Pulse { width: Some(width) } => write!(f, "PULSE,{}sec", width),
            Value::Function { function, argument } => {
                write!(f, "{}[{}]", function.keyword(), argument)
            }
            Value::Parameter(path) => {
                write!(f, "$")?;
                if let Some(program) = &path.program {
                    write!(f, "[{}]", program)?;
                }
                let mut first = true;
                for segment in &path.segments {
                    match segment {
                        ParameterSegment::Field(name) => {
                            if first {
                                write!(f, "{}", name)?;
                            } else {
                                write!(f, ".${}", name)?;
                            }
                            first = false;
                        }
                        ParameterSegment::Index(indices) => {
                            let rendered: Vec<String> =
                                indices.iter().map(|i| i.to_string()).collect();
                            write!(f, "[{}]", rendered.join(","))?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
