//! Instructions
//!
//! `Instruction` is the closed union over all top-level instruction
//! families dispatched by the line grammar. Families group related forms
//! (all branching forms, all I/O forms, ...) so the dispatcher stays an
//! ordered list of family alternatives.
//!
//! Instructions are immutable. The line number is attached by wrapping the
//! parsed instruction in `SourceInstruction` at the call site, never by
//! mutating a field after construction.

use serde::Serialize;

use super::access::Access;
use super::expression::{ArithmeticExpression, MixedLogicExpression};
use super::motion::MotionInstruction;
use super::value::{ParameterPath, Value};

/// The action half of conditional and monitor instructions:
/// `JMP LBL[n]` or `CALL prog(args)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BranchAction {
    Jump(Access),
    Call {
        program: String,
        arguments: Vec<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BranchingInstruction {
    /// `LBL[n]` / `LBL[n:comment]`
    Label(Access),
    /// `JMP LBL[n]`
    Jump(Access),
    /// `CALL prog` / `CALL prog(arg, ...)`
    Call {
        program: String,
        arguments: Vec<Value>,
    },
    /// `IF <cond>, <action>`
    If {
        condition: MixedLogicExpression,
        action: BranchAction,
    },
    /// `IF (<cond>) THEN`
    IfThen { condition: MixedLogicExpression },
    Else,
    EndIf,
    /// `SELECT R[n]=<value>, <action>` — the heading line with its first
    /// case.
    Select {
        register: Access,
        value: Value,
        action: BranchAction,
    },
    /// `=<value>, <action>` / `ELSE, <action>` continuation lines of a
    /// SELECT block. `None` is the ELSE arm. Linking cases to their
    /// heading is a consumer concern.
    SelectCase {
        value: Option<Value>,
        action: BranchAction,
    },
}

/// Mixed-logic assignment, `<target>=(<expression>)`. The parenthesized
/// right-hand side is what routes a line into this family rather than the
/// plain register/I/O assignment families.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixedLogicAssignment {
    /// `R[...]`, `F[...]`, or an output port.
    pub target: Value,
    /// The expression inside the outer parentheses.
    pub expression: MixedLogicExpression,
}

/// `R[...] = <arithmetic expression>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterAssignment {
    pub target: Access,
    pub expression: ArithmeticExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PositionRegisterInstruction {
    /// `PR[...] = <arithmetic expression>` (incl. `PR[i,j]` elements)
    Assignment {
        target: Access,
        expression: ArithmeticExpression,
    },
    /// `LOCK PREG`
    Lock,
    /// `UNLOCK PREG`
    Unlock,
}

/// `SR[...] = <arithmetic expression>`; concatenation rides `+`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringRegisterAssignment {
    pub target: Access,
    pub expression: ArithmeticExpression,
}

/// `<port or flag> = <value>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IoAssignment {
    pub target: Value,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WaitInstruction {
    /// `WAIT <value>` / `WAIT <value>(sec)`
    Duration(Value),
    /// `WAIT <cond>` / `WAIT <cond> TIMEOUT,LBL[n]`
    Condition {
        condition: MixedLogicExpression,
        timeout_label: Option<Access>,
    },
}

/// `SKIP CONDITION <cond>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipCondition {
    pub condition: MixedLogicExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForDirection {
    To,
    DownTo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInstruction {
    /// `FOR R[n]=<from> TO|DOWNTO <to>`
    For {
        register: Access,
        from: Value,
        direction: ForDirection,
        to: Value,
    },
    /// `ENDFOR`
    EndFor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConditionMonitorInstruction {
    /// `MONITOR <prog>`
    Start(String),
    /// `MONITOR END <prog>`
    End(String),
    /// `WHEN <cond>, <action>`
    When {
        condition: MixedLogicExpression,
        action: BranchAction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MultiControlInstruction {
    /// `RUN <prog>`
    Run(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CollisionGuardInstruction {
    /// `COL DETECT ON`
    DetectOn,
    /// `COL DETECT OFF`
    DetectOff,
    /// `COL GUARD ADJUST <value>`
    GuardAdjust(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OffsetFrameInstruction {
    /// `OFFSET CONDITION PR[...]`
    OffsetCondition(Access),
    /// `TOOL_OFFSET CONDITION PR[...]`
    ToolOffsetCondition(Access),
    /// `UFRAME_NUM=<value>`
    UframeNum(Value),
    /// `UTOOL_NUM=<value>`
    UtoolNum(Value),
    /// `UFRAME[n]=PR[...]`
    UframeAssignment { frame: Access, source: Access },
    /// `UTOOL[n]=PR[...]`
    UtoolAssignment { tool: Access, source: Access },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeavePattern {
    Sine,
    Circle,
    Figure8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WeldInstruction {
    /// `Weld Start[...]`
    WeldStart(Access),
    /// `Weld End[...]`
    WeldEnd(Access),
    /// `Weave Sine[...]` etc.; the schedule may be omitted.
    Weave {
        pattern: WeavePattern,
        schedule: Option<Access>,
    },
    /// `Weave End`
    WeaveEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnableDisable {
    Enable,
    Disable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerAction {
    Start,
    Stop,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MiscInstruction {
    /// `RSR[n]=ENABLE|DISABLE`
    Rsr {
        access: Access,
        state: EnableDisable,
    },
    /// `UALM[n]`
    UserAlarm(Access),
    /// `TIMER[n]=START|STOP|RESET`
    Timer {
        access: Access,
        action: TimerAction,
    },
    /// `OVERRIDE=<n>%`
    Override(Value),
    /// `$param = <value>`
    ParameterAssignment {
        parameter: ParameterPath,
        value: Value,
    },
    /// `MESSAGE[text]`
    Message(String),
    /// `PAYLOAD[n]`
    Payload(Access),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgramControlInstruction {
    Pause,
    Abort,
    End,
}

/// Top-level instruction families, in dispatcher try-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instruction {
    Motion(MotionInstruction),
    ForLoop(ForInstruction),
    Branching(BranchingInstruction),
    ConditionMonitor(ConditionMonitorInstruction),
    Skip(SkipCondition),
    Wait(WaitInstruction),
    Weld(WeldInstruction),
    CollisionGuard(CollisionGuardInstruction),
    OffsetFrame(OffsetFrameInstruction),
    MultiControl(MultiControlInstruction),
    ProgramControl(ProgramControlInstruction),
    Math(MixedLogicAssignment),
    Io(IoAssignment),
    Register(RegisterAssignment),
    PositionRegister(PositionRegisterInstruction),
    StringRegister(StringRegisterAssignment),
    Miscellaneous(MiscInstruction),
    /// `!text` and `//text`
    Comment(String),
    /// A bare program identifier — a subroutine-style macro call.
    Macro(String),
    /// Whitespace-only line body.
    Empty,
}

impl Instruction {
    /// Family name, used by the CLI summary output.
    pub fn family(&self) -> &'static str {
        match self {
            Instruction::Motion(_) => "motion",
            Instruction::ForLoop(_) => "for-loop",
            Instruction::Branching(_) => "branching",
            Instruction::ConditionMonitor(_) => "condition-monitor",
            Instruction::Skip(_) => "skip",
            Instruction::Wait(_) => "wait",
            Instruction::Weld(_) => "weld",
            Instruction::CollisionGuard(_) => "collision-guard",
            Instruction::OffsetFrame(_) => "offset-frame",
            Instruction::MultiControl(_) => "multi-control",
            Instruction::ProgramControl(_) => "program-control",
            Instruction::Math(_) => "math",
            Instruction::Io(_) => "io",
            Instruction::Register(_) => "register",
            Instruction::PositionRegister(_) => "position-register",
            Instruction::StringRegister(_) => "string-register",
            Instruction::Miscellaneous(_) => "miscellaneous",
            Instruction::Comment(_) => "comment",
            Instruction::Macro(_) => "macro",
            Instruction::Empty => "empty",
        }
    }
}

/// A parsed instruction stamped with its source positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInstruction {
    /// 1-based physical line in the source text.
    pub line: usize,
    /// TP line number from the `<n>:` prefix.
    pub number: u32,
    pub instruction: Instruction,
}
