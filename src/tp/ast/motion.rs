//! Motion instructions
//!
//! A motion line is a motion type, one position (two for circular forms),
//! a speed, a termination, and an ordered list of optional qualifiers.
//! Option order is preserved exactly as written; duplicate detection is a
//! post-parse concern, not a grammar concern.

use serde::Serialize;
use std::fmt;

use super::access::{Access, IndexValue};
use super::instruction::BranchAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotionType {
    /// `J`
    Joint,
    /// `L`
    Linear,
    /// `C`
    Circular,
    /// `A`
    CircularArc,
    /// `S`
    Spline,
}

impl MotionType {
    pub fn letter(&self) -> char {
        match self {
            MotionType::Joint => 'J',
            MotionType::Linear => 'L',
            MotionType::Circular => 'C',
            MotionType::CircularArc => 'A',
            MotionType::Spline => 'S',
        }
    }

    /// Circular forms carry a via point in addition to the destination.
    pub fn takes_second_position(&self) -> bool {
        matches!(self, MotionType::Circular | MotionType::CircularArc)
    }
}

/// A position operand: taught position or position register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PositionReference {
    /// `P[...]`
    Position(Access),
    /// `PR[...]`
    PositionRegister(Access),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedUnit {
    Percent,
    MmPerSec,
    CmPerMin,
    InchPerMin,
    DegPerSec,
    Seconds,
    Milliseconds,
}

impl SpeedUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            SpeedUnit::Percent => "%",
            SpeedUnit::MmPerSec => "mm/sec",
            SpeedUnit::CmPerMin => "cm/min",
            SpeedUnit::InchPerMin => "inch/min",
            SpeedUnit::DegPerSec => "deg/sec",
            SpeedUnit::Seconds => "sec",
            SpeedUnit::Milliseconds => "msec",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Speed {
    /// `100%`, `2000mm/sec`, `0.5sec`, ...
    Literal { value: f64, unit: SpeedUnit },
    /// `R[1]%` — speed taken from a numeric register.
    Register {
        access: Access,
        unit: Option<SpeedUnit>,
    },
    /// `WELD_SPEED`
    WeldSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// `FINE`
    Fine,
    /// `CNT<n>`
    Cnt(u32),
    /// `CD<n>` — continuous distance
    Cd(u32),
}

/// Optional motion qualifiers, in grammar try-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MotionOption {
    /// `WJNT`
    WristJoint,
    /// `ACC<n>`
    Acceleration(u32),
    /// `PTH`
    Path,
    /// `AP_LD<n>` / `AP_LDR[n]`
    ApproachLinearDistance(IndexValue),
    /// `RT_LD<n>` / `RT_LDR[n]`
    RetractLinearDistance(IndexValue),
    /// `BREAK`
    Break,
    /// `Offset` / `Offset,PR[n]`
    Offset(Option<Access>),
    /// `Tool_Offset` / `Tool_Offset,PR[n]`
    ToolOffset(Option<Access>),
    /// `ORNT_BASE`
    OrientBase,
    /// `RTCP`
    RemoteTcp,
    /// `Skip,LBL[n]`
    Skip { label: Access },
    /// `SkipJump,LBL[n]`
    SkipJump { label: Access },
    /// `TB <t>sec,<action>`
    TimeBefore { seconds: f64, action: BranchAction },
    /// `TA <t>sec,<action>`
    TimeAfter { seconds: f64, action: BranchAction },
    /// `DB <d>mm,<action>`
    DistanceBefore { millimeters: f64, action: BranchAction },
    /// `Arc Start[...]`
    ArcStart(Access),
    /// `Arc End[...]`
    ArcEnd(Access),
    /// `TA_REF[...]`
    TorchAngleReference(Access),
    /// `COORD`
    Coordinated,
    /// `EV<n>%`
    ExtendedVelocity(u32),
    /// `FPLIN`
    FaceplateLinear,
    /// `INC`
    Incremental,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionInstruction {
    pub motion_type: MotionType,
    pub primary: PositionReference,
    /// Via point, present only for `C`/`A` motions.
    pub secondary: Option<PositionReference>,
    pub speed: Speed,
    pub termination: Termination,
    /// Source-ordered; consumers search, the grammar never deduplicates.
    pub options: Vec<MotionOption>,
}

impl MotionInstruction {
    /// Whether any option of the same variant kind as `probe` is present.
    pub fn has_option(&self, probe: impl Fn(&MotionOption) -> bool) -> bool {
        self.options.iter().any(probe)
    }
}

impl fmt::Display for PositionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionReference::Position(access) => write!(f, "P[{}]", access),
            PositionReference::PositionRegister(access) => write!(f, "PR[{}]", access),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Literal { value, unit } => write!(f, "{}{}", value, unit.suffix()),
            Speed::Register { access, unit } => {
                write!(f, "R[{}]", access)?;
                if let Some(unit) = unit {
                    write!(f, "{}", unit.suffix())?;
                }
                Ok(())
            }
            Speed::WeldSpeed => write!(f, "WELD_SPEED"),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Fine => write!(f, "FINE"),
            Termination::Cnt(value) => write!(f, "CNT{}", value),
            Termination::Cd(value) => write!(f, "CD{}", value),
        }
    }
}
