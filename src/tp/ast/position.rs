//! Position table entries
//!
//! The `/POS` block stores taught positions: one entry per `P[n]{...};`
//! record, one group per motion group, each group either a Cartesian pose
//! (with optional external axes) or a joint pose.

use serde::Serialize;

/// One `<axis> = <value> <unit>` component as written in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisComponent {
    /// Axis label: `X`, `W`, `J1`, `E2`, ...
    pub axis: String,
    pub value: f64,
    /// `mm` or `deg` when present.
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PositionData {
    Cartesian {
        x: f64,
        y: f64,
        z: f64,
        w: f64,
        p: f64,
        r: f64,
        /// `E1`..`E3` components, in source order.
        external: Vec<AxisComponent>,
    },
    Joint {
        /// `J1`..`J9` components, in source order.
        axes: Vec<AxisComponent>,
    },
}

/// One motion group inside a position entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionGroup {
    pub group: u32,
    pub user_frame: u32,
    pub user_tool: u32,
    /// `CONFIG : 'N U T, 0, 0, 0'` payload, Cartesian groups only.
    pub configuration: Option<String>,
    pub data: PositionData,
}

/// One `P[n]{...};` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEntry {
    pub index: u32,
    /// `P[1:"comment"]` label.
    pub comment: Option<String>,
    pub groups: Vec<PositionGroup>,
}
