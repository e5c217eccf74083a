//! Resource addressing
//!
//! An `Access` describes how an indexed resource (register, label, I/O
//! port, flag) is addressed inside its `[...]` brackets: directly by
//! number, indirectly through a numeric register, or as a comma-separated
//! pair for ranged/element targets such as `PR[1,2]`. Index positions only
//! ever hold integers or register references, never general expressions.

use serde::Serialize;
use std::fmt;

/// An integer-or-register index position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IndexValue {
    Literal(u32),
    /// A numeric register supplying the index, e.g. the inner `R[2]` of
    /// `PR[R[2],3]`.
    Register(Box<Access>),
}

/// Addressing mode of an indexed resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Access {
    /// `[5]`, `[GP1:5]`, `[5:comment]`
    Direct {
        index: u32,
        comment: Option<String>,
        group: Option<u32>,
    },
    /// `[R[5]]` — index taken from a numeric register.
    Indirect {
        register: Box<Access>,
        group: Option<u32>,
    },
    /// `[1,2]`, `[R[1],2:comment]` — two index positions.
    Multiple {
        index: IndexValue,
        item: IndexValue,
        comment: Option<String>,
        group: Option<u32>,
    },
}

impl Access {
    /// Direct access with no comment or group, the common case in tests.
    pub fn direct(index: u32) -> Self {
        Access::Direct {
            index,
            comment: None,
            group: None,
        }
    }

    /// The literal index for direct accesses, if any.
    pub fn index(&self) -> Option<u32> {
        match self {
            Access::Direct { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Access::Direct { comment, .. } | Access::Multiple { comment, .. } => comment.as_deref(),
            Access::Indirect { .. } => None,
        }
    }

    pub fn group(&self) -> Option<u32> {
        match self {
            Access::Direct { group, .. }
            | Access::Indirect { group, .. }
            | Access::Multiple { group, .. } => *group,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Literal(value) => write!(f, "{}", value),
            IndexValue::Register(register) => write!(f, "R[{}]", register),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = self.group() {
            write!(f, "GP{}:", group)?;
        }
        match self {
            Access::Direct { index, comment, .. } => {
                write!(f, "{}", index)?;
                if let Some(comment) = comment {
                    write!(f, ":{}", comment)?;
                }
                Ok(())
            }
            Access::Indirect { register, .. } => write!(f, "R[{}]", register),
            Access::Multiple {
                index,
                item,
                comment,
                ..
            } => {
                write!(f, "{},{}", index, item)?;
                if let Some(comment) = comment {
                    write!(f, ":{}", comment)?;
                }
                Ok(())
            }
        }
    }
}
