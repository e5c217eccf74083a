//! AST for TP programs
//!
//! All grammar results are tagged-union nodes, constructed bottom-up during
//! a single parse call and never mutated afterwards. Label and jump targets
//! are stored as raw accesses; resolution is a consumer concern.

pub mod access;
pub mod expression;
pub mod instruction;
pub mod motion;
pub mod position;
pub mod program;
pub mod value;

pub use access::{Access, IndexValue};
pub use expression::{
    ArithmeticExpression, ArithmeticOperator, ComparisonOperator, LogicalOperator,
    MixedLogicExpression, MixedLogicOperator, MixedLogicTerm,
};
pub use instruction::{
    BranchAction, BranchingInstruction, CollisionGuardInstruction, ConditionMonitorInstruction,
    EnableDisable, ForDirection, ForInstruction, Instruction, IoAssignment, MiscInstruction,
    MixedLogicAssignment, MultiControlInstruction, OffsetFrameInstruction,
    PositionRegisterInstruction, ProgramControlInstruction, RegisterAssignment, SkipCondition,
    SourceInstruction, StringRegisterAssignment, TimerAction, WaitInstruction, WeavePattern,
    WeldInstruction,
};
pub use motion::{
    MotionInstruction, MotionOption, MotionType, PositionReference, Speed, SpeedUnit, Termination,
};
pub use position::{AxisComponent, PositionData, PositionEntry, PositionGroup};
pub use program::{ApplicationEntry, Attribute, AttributeValue, Header, Program};
pub use value::{
    MathFunction, OnOff, ParameterPath, ParameterSegment, PortDirection, PortKind, Value,
};
